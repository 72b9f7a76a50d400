pub mod fetch_client;
