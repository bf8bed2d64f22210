// riwayat/src/helpers/downloads/csv_download.rs
use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::info;

use crate::resource::{ListView, ResourceConfig};
use crate::utils::fields::{as_text, lookup};

/// Render the rows of a list view as CSV, one column per declared column.
pub fn export_view_as_csv(resource: &ResourceConfig, view: &ListView) -> String {
    let headers = resource.column_headers();

    let mut csv_content = headers
        .iter()
        .map(|column| escape_csv_field(&column.label))
        .collect::<Vec<_>>()
        .join(",")
        + "\n";

    for row in &view.rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|column| match lookup(row, &column.key) {
                Some(Value::Null) | None => String::new(),
                Some(value) => match as_text(value) {
                    Some(text) => escape_csv_field(&text),
                    None => escape_csv_field(&value.to_string()),
                },
            })
            .collect();
        csv_content.push_str(&(cells.join(",") + "\n"));
    }

    info!("✅ Exported {} {} records as CSV (page {})", view.rows.len(), view.resource, view.window.current_page);
    csv_content
}

/// Download name, e.g. `kitchens_page2_20240615_103000.csv`.
pub fn export_filename(view: &ListView, at: NaiveDateTime) -> String {
    format!(
        "{}_page{}_{}.csv",
        view.resource,
        view.window.current_page,
        at.format("%Y%m%d_%H%M%S")
    )
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::ListQuery;
    use crate::resource::ListOptions;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_export_view_as_csv() {
        let resource = ResourceConfig::new("kitchens", "kitchen").columns(&["id", "name", "owner.name", "tags"]);
        let rows = vec![
            json!({"id": 1, "name": "Dhaba, Lahore", "owner": {"name": "Ali \"Chef\" Raza"}, "tags": ["bbq"]}),
            json!({"id": 2, "name": "Plain", "owner": null}),
        ];
        let view = resource.view(&rows, &ListQuery::new(), ListOptions::default());

        let csv = export_view_as_csv(&resource, &view);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Id,Name,Owner Name,Tags");
        assert_eq!(lines[1], "1,\"Dhaba, Lahore\",\"Ali \"\"Chef\"\" Raza\",\"[\"\"bbq\"\"]\"");
        assert_eq!(lines[2], "2,Plain,,");
    }

    #[test]
    fn test_export_filename() {
        let resource = ResourceConfig::new("orders", "order");
        let view = resource.view(&[], &ListQuery::new(), ListOptions::default());
        let at = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap().and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(export_filename(&view, at), "orders_page1_20240615_103000.csv");
    }
}
