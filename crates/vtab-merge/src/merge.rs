use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;
use vtab_traverse::{traverse, Visit};

use crate::config::MergeConfig;
use crate::error::{MergeError, Result};
use crate::row::{MergeTable, Row, TypeTag};

/// Fold `documents` into rows keyed by path, one column per document.
///
/// `column_ids[i]` names the column for `documents[i]`. Every node below a
/// document's root becomes (or joins) the row for its path. Rows appear in
/// first-encounter order across the whole scan; cells a column never
/// reached are tagged [`TypeTag::Missing`].
///
/// Op payloads (see [`OpPayloadRule`](crate::OpPayloadRule)) produce their
/// own row plus a synthetic `code` row, and are not descended into. The
/// marker key's subtree never produces rows.
pub fn merge_columns<'a>(
    column_ids: &[String],
    documents: &'a [Value],
    config: &MergeConfig,
) -> Result<Vec<Row<'a>>> {
    merge_table(column_ids, documents, config).map(MergeTable::into_rows)
}

/// [`merge_columns`] returning the keyed [`MergeTable`].
pub fn merge_table<'a>(
    column_ids: &[String],
    documents: &'a [Value],
    config: &MergeConfig,
) -> Result<MergeTable<'a>> {
    if column_ids.len() != documents.len() {
        return Err(MergeError::ColumnMismatch {
            columns: column_ids.len(),
            documents: documents.len(),
        });
    }
    let mut seen = HashSet::with_capacity(column_ids.len());
    for column in column_ids {
        if !seen.insert(column.as_str()) {
            return Err(MergeError::DuplicateColumn(column.clone()));
        }
    }

    let mut table = MergeTable::new();
    for (column, document) in column_ids.iter().zip(documents) {
        traverse(document, |ctx| {
            if ctx.depth == 0 {
                return Visit::Continue;
            }
            if ctx.path.tail().is_some_and(|t| t.is_key(&config.marker_key)) {
                return Visit::Skip;
            }

            table.upsert(&ctx.path, column, ctx.value, TypeTag::Kind(ctx.kind), false);

            let code = config
                .op_payload
                .as_ref()
                .and_then(|rule| rule.code_of(ctx.value));
            match code {
                Some(code) => {
                    table.upsert(&ctx.path.plus_key("code"), column, code, TypeTag::Code, true);
                    Visit::Skip
                }
                None => Visit::Continue,
            }
        });
    }
    table.fill_missing(column_ids);

    debug!(columns = column_ids.len(), rows = table.len(), "merged columns");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vtab_types::ValueKind;

    fn columns(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merges_two_documents() {
        let docs = [json!({"x": 1}), json!({"x": 2, "y": 3})];
        let rows = merge_columns(
            &columns(&["v1", "v2"]),
            &docs,
            &MergeConfig::default(),
        )
        .unwrap();

        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["x", "y"]);

        let x = &rows[0];
        assert_eq!(x.value("v1"), Some(&json!(1)));
        assert_eq!(x.value("v2"), Some(&json!(2)));
        assert_eq!(x.type_tag("v1"), TypeTag::Kind(ValueKind::Number));

        let y = &rows[1];
        assert_eq!(y.value("v1"), None);
        assert_eq!(y.value("v2"), Some(&json!(3)));
        assert_eq!(y.type_tag("v1"), TypeTag::Missing);
        assert_eq!(y.type_tags.keys().collect::<Vec<_>>(), vec!["v1", "v2"]);
    }

    #[test]
    fn rows_follow_first_encounter_order() {
        let docs = [json!({"m": {"n": 1}}), json!({"z": 0, "m": {"n": 2, "o": 3}})];
        let rows = merge_columns(
            &columns(&["a", "b"]),
            &docs,
            &MergeConfig::default(),
        )
        .unwrap();
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["m", "m.n", "z", "m.o"]);
    }

    #[test]
    fn container_rows_hold_subtrees() {
        let docs = [json!({"list": [1, 2]})];
        let table = merge_table(
            &columns(&["only"]),
            &docs,
            &MergeConfig::default(),
        )
        .unwrap();
        let list = table.get("list").unwrap();
        assert_eq!(list.value("only"), Some(&json!([1, 2])));
        assert_eq!(list.type_tag("only"), TypeTag::Kind(ValueKind::Array));
        assert!(table.get("list[1]").is_some());
    }

    #[test]
    fn op_payload_gets_code_row_and_is_not_descended() {
        let doc = json!({"step": {"_type": "Op", "code": "ref:code/7", "args": {"n": 1}}});
        let docs = [doc];
        let table = merge_table(&columns(&["c"]), &docs, &MergeConfig::default()).unwrap();

        let keys: Vec<&str> = table.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["step", "step.code"]);

        let code = table.get("step.code").unwrap();
        assert!(code.is_code);
        assert_eq!(code.type_tag("c"), TypeTag::Code);
        assert_eq!(code.value("c"), Some(&json!("ref:code/7")));
        assert!(!table.get("step").unwrap().is_code);
    }

    #[test]
    fn op_detection_can_be_disabled() {
        let config = MergeConfig {
            op_payload: None,
            ..Default::default()
        };
        let doc = json!({"step": {"_type": "Op", "code": "x"}});
        let docs = [doc];
        let table = merge_table(&columns(&["c"]), &docs, &config).unwrap();
        assert!(table.get("step._type").is_some());
        assert!(!table.get("step.code").unwrap().is_code);
    }

    #[test]
    fn marker_key_never_becomes_a_row() {
        let doc = json!({"dep": {"__ref__": "ref:a", "name": "a"}});
        let docs = [doc];
        let table = merge_table(&columns(&["c"]), &docs, &MergeConfig::default()).unwrap();
        let keys: Vec<&str> = table.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["dep", "dep.name"]);
    }

    #[test]
    fn group_keys_are_unescaped() {
        let docs = [json!({"a.b": [true]})];
        let table = merge_table(
            &columns(&["c"]),
            &docs,
            &MergeConfig::default(),
        )
        .unwrap();
        let row = table.get(r"a\.b[0]").unwrap();
        assert_eq!(row.group_keys(), vec!["a.b".to_string(), "0".to_string()]);
    }

    #[test]
    fn rejects_misaligned_inputs() {
        let err = merge_columns(&columns(&["a"]), &[], &MergeConfig::default()).unwrap_err();
        assert_eq!(err, MergeError::ColumnMismatch { columns: 1, documents: 0 });

        let err = merge_columns(
            &columns(&["a", "a"]),
            &[json!({}), json!({})],
            &MergeConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, MergeError::DuplicateColumn("a".into()));
    }

    #[test]
    fn code_row_shared_with_a_plain_code_key() {
        let docs = [
            json!({"step": {"_type": "Op", "code": "ref:code/1"}}),
            json!({"step": {"_type": "Table", "code": 7}}),
        ];
        let table = merge_table(&columns(&["op", "plain"]), &docs, &MergeConfig::default()).unwrap();

        let code = table.get("step.code").unwrap();
        assert!(code.is_code);
        assert_eq!(code.type_tag("op"), TypeTag::Code);
        assert_eq!(code.type_tag("plain"), TypeTag::Kind(ValueKind::Number));
        assert_eq!(code.value("op"), Some(&json!("ref:code/1")));
        assert_eq!(code.value("plain"), Some(&json!(7)));
        assert_eq!(table.get("step._type").unwrap().type_tag("op"), TypeTag::Missing);
    }

    #[test]
    fn deep_input_does_not_overflow() {
        // Rows own their paths, so memory grows with depth squared.
        const DEPTH: usize = 3_000;
        let mut doc = json!(0);
        for _ in 0..DEPTH {
            doc = json!([doc]);
        }
        let docs = [doc];
        let table = merge_table(&columns(&["c"]), &docs, &MergeConfig::default()).unwrap();
        assert_eq!(table.len(), DEPTH);
        let first = table.get("[0]").unwrap();
        assert!(std::ptr::eq(first.value("c").unwrap(), &docs[0][0]));
        drop(table);
        // serde_json's own Drop is recursive; leak the value instead.
        std::mem::forget(docs);
    }

    #[test]
    fn scalar_documents_produce_no_rows() {
        let docs = [json!(5)];
        let rows = merge_columns(&columns(&["a"]), &docs, &MergeConfig::default()).unwrap();
        assert!(rows.is_empty());
    }
}
