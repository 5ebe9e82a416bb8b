//! SpreadsheetML (Excel 2003 XML) rendering of product lists.

use quick_xml::escape::escape;
use wishlist_lists::ProductListEntry;

const HEADER: &str = concat!(
    r#"<?xml version="1.0"?><?mso-application progid="Excel.Sheet"?>"#,
    r#"<Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet" "#,
    r#"xmlns:o="urn:schemas-microsoft-com:office:office" "#,
    r#"xmlns:x="urn:schemas-microsoft-com:office:excel" "#,
    r#"xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet" "#,
    r#"xmlns:html="http://www.w3.org/TR/REC-html40">"#,
    r#"<Worksheet ss:Name="Sheet1">"#,
    r#"<Styles><Style ss:ID="s63">"#,
    r##"<Font x:CharSet="204" ss:Size="12" ss:Color="#000000" ss:Bold="1" ss:Underline="Single"/>"##,
    r#"</Style></Styles>"#,
);

const FOOTER: &str = "</Table></Worksheet></Workbook>";

/// One bold row per list name, followed by a row per line:
/// display name, item id, quantity.
pub fn render_workbook(lists: &[ProductListEntry]) -> String {
    let mut xml = String::from(HEADER);
    xml.push_str("<Table>");
    for list in lists {
        xml.push_str("<Row>");
        push_cell(&mut xml, Some("s63"), list.name());
        xml.push_str("</Row>");
        for line in list.items() {
            xml.push_str("<Row>");
            push_cell(&mut xml, None, &line.item.display_name);
            push_cell(&mut xml, None, &line.item.internal_id);
            push_cell(&mut xml, None, &line.quantity.to_string());
            xml.push_str("</Row>");
        }
    }
    xml.push_str(FOOTER);
    xml
}

/// List names each followed by their items' display names.
pub fn summary_lines(lists: &[ProductListEntry]) -> Vec<String> {
    lists
        .iter()
        .flat_map(|list| {
            std::iter::once(list.name().to_string())
                .chain(list.items().iter().map(|line| line.item.display_name.clone()))
        })
        .collect()
}

fn push_cell(xml: &mut String, style: Option<&str>, text: &str) {
    match style {
        Some(style) => {
            xml.push_str(r#"<Cell ss:StyleID=""#);
            xml.push_str(style);
            xml.push_str(r#"">"#);
        }
        None => xml.push_str("<Cell>"),
    }
    xml.push_str(r#"<Data ss:Type="String">"#);
    xml.push_str(&escape(text));
    xml.push_str("</Data></Cell>");
}
