// src/common/pagination.rs

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 200;

/// Normaliza os parâmetros de paginação vindos da query string.
/// Retorna `(page, page_size, offset)` já saneados.
pub fn normalize(page: Option<i64>, page_size: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    (page, page_size, (page - 1) * page_size)
}

/// Trata string vazia de busca como ausência de filtro.
pub fn search_term(search: &Option<String>) -> Option<&str> {
    search.as_deref().filter(|s| !s.trim().is_empty())
}

// Envelope padrão das listagens: { data, total, page, pageSize, totalPages }.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + page_size - 1) / page_size
        };
        Self {
            data,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normaliza_valores_padrao() {
        assert_eq!(normalize(None, None), (1, DEFAULT_PAGE_SIZE, 0));
    }

    #[test]
    fn normaliza_pagina_e_offset() {
        assert_eq!(normalize(Some(3), Some(20)), (3, 20, 40));
    }

    #[test]
    fn rejeita_pagina_zero_e_limita_tamanho() {
        assert_eq!(normalize(Some(0), Some(-5)), (1, 1, 0));
        let (_, size, _) = normalize(Some(1), Some(10_000));
        assert_eq!(size, MAX_PAGE_SIZE);
    }

    #[test]
    fn total_pages_arredonda_para_cima() {
        let p = Paginated::<u8>::new(vec![], 41, 1, 20);
        assert_eq!(p.total_pages, 3);
        let p = Paginated::<u8>::new(vec![], 40, 1, 20);
        assert_eq!(p.total_pages, 2);
        let p = Paginated::<u8>::new(vec![], 0, 1, 20);
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn busca_vazia_e_none() {
        assert_eq!(search_term(&Some("  ".to_string())), None);
        assert_eq!(search_term(&Some("bomba".to_string())), Some("bomba"));
        assert_eq!(search_term(&None), None);
    }

    #[test]
    fn envelope_serializa_em_camel_case() {
        let p = Paginated::new(vec![1, 2, 3], 3, 1, 20);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["total"], 3);
        assert_eq!(json["page"], 1);
        assert_eq!(json["pageSize"], 20);
        assert_eq!(json["totalPages"], 1);
    }
}
