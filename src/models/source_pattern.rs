//! 可识别的矢量图片托管地址
//!
//! 只支持两种来源：对象存储与静态乐谱数据路径，其他地址（占位图、广告、统计）一律丢弃

use crate::models::score::PageImageSource;

/// 对象存储路径特征
pub const OBJECT_STORAGE_SIGNATURE: &str = "s3.ultimate-guitar.com";
/// 静态乐谱数据路径特征
pub const STATIC_SCORE_DATA_SIGNATURE: &str = "musescore.com/static/musescore/scoredata";

const RECOGNIZED_SIGNATURES: [&str; 2] = [OBJECT_STORAGE_SIGNATURE, STATIC_SCORE_DATA_SIGNATURE];

/// 判断地址是否属于可识别的乐谱来源
pub fn is_recognized(src: &str) -> bool {
    RECOGNIZED_SIGNATURES
        .iter()
        .any(|signature| src.contains(signature))
}

/// 过滤出可识别的地址，保持相对顺序
pub fn filter_recognized<I, S>(sources: I) -> Vec<PageImageSource>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sources
        .into_iter()
        .filter(|src| is_recognized(src.as_ref()))
        .map(|src| PageImageSource::new(src.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_0: &str = "https://s3.ultimate-guitar.com/musescore.scoredata/g/abc/score_0.svg?no-cache=1";
    const PAGE_1: &str = "https://musescore.com/static/musescore/scoredata/g/abc/score_1.svg";
    const AD: &str = "https://ads.example.com/banner.svg";
    const TRACKING: &str = "https://musescore.com/static/public/img/pixel.gif";

    #[test]
    fn test_filter_keeps_recognized_in_order() {
        let filtered = filter_recognized([AD, PAGE_1, TRACKING, PAGE_0]);
        let urls: Vec<&str> = filtered.iter().map(|s| s.as_str()).collect();
        assert_eq!(urls, vec![PAGE_1, PAGE_0]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = filter_recognized([PAGE_0, AD, PAGE_1, PAGE_0]);
        let twice = filter_recognized(once.iter().map(|s| s.as_str()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unrecognized_only_yields_empty() {
        assert!(filter_recognized([AD, TRACKING]).is_empty());
        assert!(filter_recognized(Vec::<String>::new()).is_empty());
    }
}
