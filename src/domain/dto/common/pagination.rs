//! 목록/검색 요청 파라미터와 페이지 응답

use serde::{Deserialize, Serialize};
use crate::utils::string_utils::deserialize_optional_string;

/// 정렬 방향
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// MongoDB 정렬 문서에 쓰이는 값 (1 / -1)
    pub fn as_i32(&self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// 목록 조회 쿼리 파라미터
///
/// `GET /api/v1/products?page=2&limit=20&sort_by=price&sort_order=asc`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    /// 1부터 시작하는 페이지 번호
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

/// 검색 쿼리 파라미터
///
/// `GET /api/v1/products/search?q=keyboard&page=1&limit=10`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// 검색어 (앞뒤 공백 제거, 빈 값은 None)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub q: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl SearchParams {
    pub fn list_params(&self) -> ListParams {
        ListParams {
            page: self.page,
            limit: self.limit,
            sort_by: None,
            sort_order: None,
        }
    }
}

/// 페이지 단위 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// 조건에 맞는 전체 문서 수
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// 항목 타입을 변환합니다 (엔티티 → 응답 DTO).
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page = PaginatedResponse::new(vec![1, 2, 3], 21, 1, 10);
        assert_eq!(page.total_pages, 3);

        let empty: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 0, 1, 10);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_map_keeps_paging_fields() {
        let page = PaginatedResponse::new(vec![1, 2], 12, 2, 10).map(|n| n.to_string());
        assert_eq!(page.items, vec!["1".to_string(), "2".to_string()]);
        assert_eq!((page.total, page.page, page.limit, page.total_pages), (12, 2, 10, 2));
    }

    #[test]
    fn test_sort_order_parsing() {
        let params: ListParams =
            serde_json::from_str(r#"{"sort_by": " price ", "sort_order": "asc"}"#).unwrap();
        assert_eq!(params.sort_by.as_deref(), Some("price"));
        assert_eq!(params.sort_order, Some(SortOrder::Asc));
        assert_eq!(SortOrder::default().as_i32(), -1);
    }
}
