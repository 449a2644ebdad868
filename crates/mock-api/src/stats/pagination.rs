//! 分页
//!
//! limit/offset 宽松解析：缺失、无法解析或为 0 时使用默认值，随后夹到允许范围。

use paymore_shared::config::parse_leading_int;
use serde::{Deserialize, Serialize};

/// offset 上限
const MAX_OFFSET: i64 = 1_000_000_000;

/// 各接口的分页约束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl PageLimits {
    pub const RECENT_TRANSACTIONS: Self = Self::new(10, 50);
    pub const TERMINALS: Self = Self::new(20, 200);
    pub const NOTIFICATIONS: Self = Self::new(20, 200);

    pub const fn new(default_limit: usize, max_limit: usize) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }
}

/// 原始分页参数
///
/// 保留字符串形式，非法值不会导致请求被拒绝
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// 解析后的分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub limit: usize,
    pub offset: usize,
}

impl PageQuery {
    pub fn resolve(&self, limits: PageLimits) -> PageParams {
        let limit = lenient(self.limit.as_deref())
            .unwrap_or(limits.default_limit as i64)
            .clamp(1, limits.max_limit as i64);
        let offset = lenient(self.offset.as_deref())
            .unwrap_or(0)
            .clamp(0, MAX_OFFSET);

        PageParams {
            limit: limit as usize,
            offset: offset as usize,
        }
    }
}

/// 0 与无法解析的值都视为缺失
fn lenient(raw: Option<&str>) -> Option<i64> {
    raw.and_then(parse_leading_int).filter(|n| *n != 0)
}

/// 分页信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// 截取一页数据
pub fn paginate<T: Clone>(items: &[T], params: PageParams) -> (Vec<T>, Pagination) {
    let total = items.len();
    let start = params.offset.min(total);
    let end = params.offset.saturating_add(params.limit).min(total);

    let pagination = Pagination {
        total,
        limit: params.limit,
        offset: params.offset,
        has_more: params.offset.saturating_add(params.limit) < total,
    };
    (items[start..end].to_vec(), pagination)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>, offset: Option<&str>) -> PageQuery {
        PageQuery {
            limit: limit.map(str::to_string),
            offset: offset.map(str::to_string),
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let params = query(None, None).resolve(PageLimits::TERMINALS);
        assert_eq!(params, PageParams { limit: 20, offset: 0 });
    }

    #[test]
    fn test_resolve_lenient_values() {
        let limits = PageLimits::RECENT_TRANSACTIONS;
        assert_eq!(query(Some("abc"), None).resolve(limits).limit, 10);
        assert_eq!(query(Some("0"), None).resolve(limits).limit, 10);
        assert_eq!(query(Some("500"), None).resolve(limits).limit, 50);
        assert_eq!(query(Some("-5"), None).resolve(limits).limit, 1);
        assert_eq!(query(Some("25rows"), None).resolve(limits).limit, 25);
        assert_eq!(query(None, Some("-3")).resolve(limits).offset, 0);
        assert_eq!(query(None, Some("99999999999")).resolve(limits).offset, 1_000_000_000);
    }

    #[test]
    fn test_paginate_has_more() {
        let items: Vec<u32> = (0..25).collect();

        let (page, info) = paginate(&items, PageParams { limit: 10, offset: 0 });
        assert_eq!(page, (0..10).collect::<Vec<_>>());
        assert!(info.has_more);

        let (page, info) = paginate(&items, PageParams { limit: 10, offset: 20 });
        assert_eq!(page.len(), 5);
        assert!(!info.has_more);
        assert_eq!(info.total, 25);

        let (page, info) = paginate(&items, PageParams { limit: 10, offset: 15 });
        assert_eq!(page.len(), 10);
        assert!(!info.has_more);
    }

    #[test]
    fn test_paginate_offset_past_end() {
        let items = [1, 2, 3];
        let (page, info) = paginate(&items, PageParams { limit: 5, offset: 1_000_000_000 });
        assert!(page.is_empty());
        assert!(!info.has_more);
    }

    #[test]
    fn test_consecutive_pages_disjoint() {
        let items: Vec<u32> = (0..37).collect();
        let mut seen = Vec::new();
        let mut offset = 0;
        loop {
            let (page, info) = paginate(&items, PageParams { limit: 8, offset });
            seen.extend(page);
            if !info.has_more {
                break;
            }
            offset += 8;
        }
        assert_eq!(seen, items);
    }
}
