use comfy_table::presets::UTF8_FULL;
use comfy_table::*;

pub fn format_key_value_table(data: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80)
        .set_header(vec!["Key", "Value"]);

    for (key, value) in data {
        table.add_row(vec![
            Cell::new(key).add_attribute(Attribute::Bold),
            Cell::new(value),
        ]);
    }

    table
}

pub fn print_key_value_table(data: Vec<(&str, String)>) {
    println!("{}", format_key_value_table(data));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_table_contains_rows() {
        let rendered = format_key_value_table(vec![
            ("review_model", "Sonnet".to_string()),
            ("application_count", "20".to_string()),
        ])
        .to_string();

        assert!(rendered.contains("Key"));
        assert!(rendered.contains("review_model"));
        assert!(rendered.contains("Sonnet"));
        assert!(rendered.contains("application_count"));
    }
}
