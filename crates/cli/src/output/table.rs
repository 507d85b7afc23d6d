//! Table rendering for object listings

use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use s3c_core::ObjectInfo;

/// Render an object listing as a table
///
/// Version columns are added only when the listing contains versions.
pub fn render_objects(items: &[ObjectInfo], versions: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    if versions {
        table.set_header(vec![
            "Key",
            "Size",
            "Last Modified",
            "Version ID",
            "Latest",
        ]);
    } else {
        table.set_header(vec!["Key", "Size", "Last Modified", "Storage Class"]);
    }

    for item in items {
        let date = item
            .last_modified
            .map(|t| t.strftime("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();

        if versions {
            table.add_row(vec![
                item.key.clone(),
                item.size_human.clone(),
                date,
                item.version_id.clone().unwrap_or_default(),
                match item.is_latest {
                    Some(true) => "yes".to_string(),
                    Some(false) => "no".to_string(),
                    None => String::new(),
                },
            ]);
        } else {
            table.add_row(vec![
                item.key.clone(),
                item.size_human.clone(),
                date,
                item.storage_class.clone().unwrap_or_default(),
            ]);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_objects_basic() {
        let items = vec![ObjectInfo::new("docs/readme.md", 2048)];
        let rendered = render_objects(&items, false).to_string();
        assert!(rendered.contains("docs/readme.md"));
        assert!(rendered.contains("2 KiB"));
        assert!(rendered.contains("Storage Class"));
    }

    #[test]
    fn test_render_objects_versions_columns() {
        let mut item = ObjectInfo::new("a.txt", 1);
        item.version_id = Some("v1".into());
        item.is_latest = Some(true);
        let rendered = render_objects(&[item], true).to_string();
        assert!(rendered.contains("Version ID"));
        assert!(rendered.contains("v1"));
        assert!(rendered.contains("yes"));
    }
}
