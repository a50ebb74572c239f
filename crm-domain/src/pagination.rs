//! 分页请求与分页结果
//!
//! `PageRequest` 携带页码、页大小与排序；排序字段类型由各模块
//! 以封闭枚举提供，未知排序字段在构造期即被拒绝，而不是原样
//! 透传到查询层。
//!
use serde::{Deserialize, Serialize};

/// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// 分页请求
///
/// 默认值：`page=1`，`per_page=15`，排序字段取 `S::default()`，
/// 方向为降序。`S` 为各模块的排序字段枚举。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest<S> {
    page: u64,
    per_page: u64,
    sort_by: S,
    direction: SortDirection,
}

impl<S: Default> Default for PageRequest<S> {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 15,
            sort_by: S::default(),
            direction: SortDirection::Desc,
        }
    }
}

impl<S> PageRequest<S> {
    /// 页码从 1 开始，0 会被归一化为 1
    pub fn page(mut self, page: u64) -> Self {
        self.page = page.max(1);
        self
    }

    /// 页大小限制在 1..=100
    pub fn per_page(mut self, per_page: u64) -> Self {
        self.per_page = per_page.clamp(1, 100);
        self
    }

    pub fn sort_by(mut self, sort_by: S) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// 页码下界为 1（反序列化得到的 0 也会被归一化）
    pub fn page_number(&self) -> u64 {
        self.page.max(1)
    }

    /// 页大小下界为 1
    pub fn page_size(&self) -> u64 {
        self.per_page.max(1)
    }

    pub fn sort_field(&self) -> &S {
        &self.sort_by
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.direction
    }

    /// 当前页在全量结果中的起始偏移
    pub fn offset(&self) -> u64 {
        (self.page_number() - 1) * self.page_size()
    }
}

/// 分页元信息（随结果返回给调用方）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// 一页查询结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> PageResult<T> {
    pub fn new<S>(items: Vec<T>, request: &PageRequest<S>, total: u64) -> Self {
        Self {
            items,
            page: request.page_number(),
            per_page: request.page_size(),
            total,
            total_pages: total.div_ceil(request.page_size()),
        }
    }

    pub fn info(&self) -> PageInfo {
        PageInfo {
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum Sort {
        #[default]
        CreatedAt,
    }

    #[test]
    fn defaults_match_the_documented_contract() {
        let req = PageRequest::<Sort>::default();
        assert_eq!(req.page_number(), 1);
        assert_eq!(req.page_size(), 15);
        assert_eq!(req.sort_direction(), SortDirection::Desc);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn page_zero_is_normalized_and_per_page_is_clamped() {
        let req = PageRequest::<Sort>::default().page(0).per_page(10_000);
        assert_eq!(req.page_number(), 1);
        assert_eq!(req.page_size(), 100);
    }

    #[test]
    fn total_pages_rounds_up() {
        let req = PageRequest::<Sort>::default().per_page(15);
        let page = PageResult::new(vec![1, 2, 3], &req, 31);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.info().total, 31);

        let empty: PageResult<i32> = PageResult::new(vec![], &req, 0);
        assert_eq!(empty.total_pages, 0);
    }
}
