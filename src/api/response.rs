use serde::Serialize;

use crate::types::models::{Pagination, RankRange};

/// Success envelope: `{"success": true, "data": ..., <meta fields>}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T, M = NoMeta> {
    pub success: bool,
    pub data: T,
    #[serde(flatten)]
    pub meta: M,
}

#[derive(Debug, Default, Serialize)]
pub struct NoMeta {}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct RangeMeta {
    pub range: RankRange,
}

#[derive(Debug, Serialize)]
pub struct CountMeta {
    pub count: usize,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: NoMeta {},
        }
    }
}

impl<T, M> Envelope<T, M> {
    pub fn with_meta(data: T, meta: M) -> Self {
        Self {
            success: true,
            data,
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meta_fields_sit_beside_data() {
        let body = serde_json::to_value(Envelope::with_meta(vec![1, 2], CountMeta { count: 2 }))
            .unwrap();
        assert_eq!(body, json!({"success": true, "data": [1, 2], "count": 2}));

        let plain = serde_json::to_value(Envelope::ok("x")).unwrap();
        assert_eq!(plain, json!({"success": true, "data": "x"}));
    }
}
