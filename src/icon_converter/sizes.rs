//! # 目标尺寸集合
//!
//! ICO 目录项用 1 字节记录宽高（0 表示 256），因此单个图标帧最大 256×256。
//! `ResolutionSet` 在构造时完成全部校验，后续阶段可直接信任其内容。

use serde::{Deserialize, Serialize};

use super::ConvertError;

/// 默认输出尺寸（由大到小，与写入顺序一致）。
pub const DEFAULT_ICON_SIZES: [u32; 6] = [256, 128, 64, 48, 32, 16];

/// ICO 单帧允许的最大边长。
pub const MAX_ICON_DIMENSION: u32 = 256;

/// 有序、去重、非空的正方形尺寸集合。
///
/// # 示例
/// ```rust
/// use favicon_converter::icon_converter::ResolutionSet;
///
/// let sizes = ResolutionSet::new(vec![48, 32, 16])?;
/// assert_eq!(sizes.as_slice(), &[48, 32, 16]);
/// # Ok::<(), favicon_converter::icon_converter::ConvertError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct ResolutionSet(Vec<u32>);

impl ResolutionSet {
    pub fn new(sizes: Vec<u32>) -> Result<Self, ConvertError> {
        if sizes.is_empty() {
            return Err(ConvertError::InvalidSize("尺寸集合不能为空".to_string()));
        }

        for (idx, &size) in sizes.iter().enumerate() {
            if size == 0 || size > MAX_ICON_DIMENSION {
                return Err(ConvertError::InvalidSize(format!(
                    "图标尺寸必须在 1~{} 之间：{}",
                    MAX_ICON_DIMENSION, size
                )));
            }
            if sizes[..idx].contains(&size) {
                return Err(ConvertError::InvalidSize(format!("图标尺寸重复：{}", size)));
            }
        }

        Ok(Self(sizes))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// 按上限拆分：返回（保留的尺寸，被丢弃的尺寸）。
    ///
    /// 保留部分为空时返回 `None`，由调用方决定如何报错。
    pub(crate) fn split_by_limit(&self, limit: u32) -> (Option<Self>, Vec<u32>) {
        let (kept, dropped): (Vec<u32>, Vec<u32>) = self.0.iter().partition(|&&size| size <= limit);
        let kept = if kept.is_empty() { None } else { Some(Self(kept)) };
        (kept, dropped)
    }
}

impl Default for ResolutionSet {
    fn default() -> Self {
        Self(DEFAULT_ICON_SIZES.to_vec())
    }
}

impl TryFrom<Vec<u32>> for ResolutionSet {
    type Error = ConvertError;

    fn try_from(sizes: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(sizes)
    }
}

impl From<ResolutionSet> for Vec<u32> {
    fn from(set: ResolutionSet) -> Self {
        set.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_matches_favicon_sizes() {
        let sizes = ResolutionSet::default();
        assert_eq!(sizes.as_slice(), &[256, 128, 64, 48, 32, 16]);
        assert_eq!(sizes.len(), 6);
    }

    #[test]
    fn rejects_empty_zero_oversize_and_duplicates() {
        assert!(matches!(ResolutionSet::new(vec![]), Err(ConvertError::InvalidSize(_))));
        assert!(matches!(ResolutionSet::new(vec![32, 0]), Err(ConvertError::InvalidSize(_))));
        assert!(matches!(ResolutionSet::new(vec![512]), Err(ConvertError::InvalidSize(_))));
        assert!(matches!(
            ResolutionSet::new(vec![32, 16, 32]),
            Err(ConvertError::InvalidSize(_))
        ));
    }

    #[test]
    fn split_by_limit_keeps_order() {
        let sizes = ResolutionSet::default();
        let (kept, dropped) = sizes.split_by_limit(50);
        assert_eq!(kept.expect("some sizes kept").as_slice(), &[48, 32, 16]);
        assert_eq!(dropped, vec![256, 128, 64]);

        let (kept, dropped) = sizes.split_by_limit(8);
        assert!(kept.is_none());
        assert_eq!(dropped.len(), 6);
    }

    #[test]
    fn deserialize_validates() {
        let ok: ResolutionSet = serde_json::from_str("[64, 16]").expect("valid sizes");
        assert_eq!(ok.as_slice(), &[64, 16]);
        assert!(serde_json::from_str::<ResolutionSet>("[16, 16]").is_err());
    }

    proptest! {
        #[test]
        fn accepted_sets_are_distinct_and_in_range(raw in prop::collection::vec(0u32..400, 0..10)) {
            match ResolutionSet::new(raw.clone()) {
                Ok(set) => {
                    prop_assert_eq!(set.as_slice(), raw.as_slice());
                    for (idx, size) in set.iter().enumerate() {
                        prop_assert!((1..=MAX_ICON_DIMENSION).contains(&size));
                        prop_assert!(!set.as_slice()[..idx].contains(&size));
                    }
                }
                Err(_) => {
                    let mut dedup = raw.clone();
                    dedup.sort_unstable();
                    dedup.dedup();
                    let invalid = raw.is_empty()
                        || dedup.len() != raw.len()
                        || raw.iter().any(|&s| s == 0 || s > MAX_ICON_DIMENSION);
                    prop_assert!(invalid);
                }
            }
        }
    }
}
