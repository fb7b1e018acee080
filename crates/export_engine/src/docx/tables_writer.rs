//! Table writer for DOCX files
//!
//! Generates w:tbl elements from the DOCX table AST.

use crate::docx::ast::{DocxTable, DocxTableCell};
use crate::docx::document_writer::{write_run, PAGE_MARGIN_TWIPS, PAGE_WIDTH_TWIPS};
use crate::docx::error::DocxResult;

/// Writer for table elements
pub struct TableWriter;

impl TableWriter {
    /// Create a new table writer
    pub fn new() -> Self {
        Self
    }

    /// Write a table element
    pub fn write_table(&self, xml: &mut String, table: &DocxTable) -> DocxResult<()> {
        xml.push_str("<w:tbl>");

        self.write_table_properties(xml)?;
        self.write_table_grid(xml, table)?;

        for row in &table.rows {
            xml.push_str("<w:tr>");
            for cell in &row.cells {
                self.write_table_cell(xml, cell)?;
            }
            xml.push_str("</w:tr>");
        }

        xml.push_str("</w:tbl>");
        Ok(())
    }

    /// Write table properties
    fn write_table_properties(&self, xml: &mut String) -> DocxResult<()> {
        xml.push_str("<w:tblPr>");

        // Full content width.
        xml.push_str(r#"<w:tblW w:w="5000" w:type="pct"/>"#);

        // Single-line borders all around.
        xml.push_str("<w:tblBorders>");
        for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            xml.push_str(&format!(
                r#"<w:{edge} w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#
            ));
        }
        xml.push_str("</w:tblBorders>");

        // Default cell margins.
        xml.push_str("<w:tblCellMar>");
        xml.push_str(r#"<w:top w:w="0" w:type="dxa"/>"#);
        xml.push_str(r#"<w:left w:w="108" w:type="dxa"/>"#);
        xml.push_str(r#"<w:bottom w:w="0" w:type="dxa"/>"#);
        xml.push_str(r#"<w:right w:w="108" w:type="dxa"/>"#);
        xml.push_str("</w:tblCellMar>");

        xml.push_str(r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#);

        xml.push_str("</w:tblPr>");
        Ok(())
    }

    /// Write the table grid from the first row's cell count
    fn write_table_grid(&self, xml: &mut String, table: &DocxTable) -> DocxResult<()> {
        let columns = table.rows.first().map(|r| r.cells.len()).unwrap_or(0);
        if columns == 0 {
            return Ok(());
        }

        let content_width = PAGE_WIDTH_TWIPS - 2 * PAGE_MARGIN_TWIPS;
        let col_width = content_width / columns as u32;

        xml.push_str("<w:tblGrid>");
        for _ in 0..columns {
            xml.push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, col_width));
        }
        xml.push_str("</w:tblGrid>");
        Ok(())
    }

    /// Write a table cell
    fn write_table_cell(&self, xml: &mut String, cell: &DocxTableCell) -> DocxResult<()> {
        xml.push_str("<w:tc>");

        // Cell width in fiftieths of a percent.
        let pct_units = (cell.width_pct * 50.0).round() as i32;
        xml.push_str("<w:tcPr>");
        xml.push_str(&format!(r#"<w:tcW w:w="{}" w:type="pct"/>"#, pct_units));
        xml.push_str("</w:tcPr>");

        // One paragraph of runs; header cells render bold.
        xml.push_str("<w:p>");
        for run in &cell.runs {
            write_run(xml, run, cell.header)?;
        }
        xml.push_str("</w:p>");

        xml.push_str("</w:tc>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::ast::{DocxRun, DocxTableRow};

    fn cell(text: &str, header: bool, width_pct: f32) -> DocxTableCell {
        DocxTableCell {
            runs: vec![DocxRun::text(text)],
            header,
            width_pct,
        }
    }

    #[test]
    fn test_table_rows_and_cells_are_emitted() {
        let table = DocxTable {
            rows: vec![
                DocxTableRow {
                    cells: vec![cell("A", true, 50.0), cell("B", true, 50.0)],
                },
                DocxTableRow {
                    cells: vec![cell("1", false, 50.0), cell("2", false, 50.0)],
                },
            ],
        };
        let mut xml = String::new();
        TableWriter::new().write_table(&mut xml, &table).unwrap();

        assert_eq!(xml.matches("<w:tr>").count(), 2);
        assert_eq!(xml.matches("<w:tc>").count(), 4);
        assert_eq!(xml.matches(r#"<w:gridCol"#).count(), 2);
    }

    #[test]
    fn test_cell_widths_in_pct_units() {
        let third = 100.0 / 3.0;
        let table = DocxTable {
            rows: vec![DocxTableRow {
                cells: vec![
                    cell("a", false, third),
                    cell("b", false, third),
                    cell("c", false, third),
                ],
            }],
        };
        let mut xml = String::new();
        TableWriter::new().write_table(&mut xml, &table).unwrap();
        // 33.33% -> 1667 fiftieths of a percent.
        assert_eq!(xml.matches(r#"<w:tcW w:w="1667" w:type="pct"/>"#).count(), 3);
    }

    #[test]
    fn test_header_cells_render_bold() {
        let table = DocxTable {
            rows: vec![DocxTableRow {
                cells: vec![cell("Header", true, 100.0)],
            }],
        };
        let mut xml = String::new();
        TableWriter::new().write_table(&mut xml, &table).unwrap();
        assert!(xml.contains("<w:b/>"));
    }

    #[test]
    fn test_borders_are_single_lines() {
        let table = DocxTable {
            rows: vec![DocxTableRow {
                cells: vec![cell("x", false, 100.0)],
            }],
        };
        let mut xml = String::new();
        TableWriter::new().write_table(&mut xml, &table).unwrap();
        assert!(xml.contains("<w:tblBorders>"));
        assert!(xml.contains(r#"<w:insideV w:val="single""#));
    }
}
