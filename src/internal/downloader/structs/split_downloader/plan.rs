//! 分段规划：把 `[0, size-1]` 均分为连续、不重叠的闭区间。

use crate::internal::resource::structs::segment::Segment;

/// 计算分段方案。
///
/// 实际段数取 `min(请求数, 总字节数)`——段数多于字节数时收紧，
/// 保证不存在零长段；每段 `size / 段数`（向下取整）字节，
/// 余数全部并入最后一段。`size == 0` 返回空方案。
pub(crate) fn plan_segments(total_size: u64, requested_sections: usize) -> Vec<Segment> {
    if total_size == 0 || requested_sections == 0 {
        return Vec::new();
    }

    let sections = (requested_sections as u64).min(total_size);
    let each = total_size / sections;

    (0..sections)
        .map(|i| {
            let start = i * each;
            let end = if i == sections - 1 {
                total_size - 1
            } else {
                start + each - 1
            };
            Segment {
                index: i as usize,
                start,
                end,
            }
        })
        .collect()
}
