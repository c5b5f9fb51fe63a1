//! Exam table parser
//!
//! A course plan table mixes section rows (`tr.rowsubtitle`, e.g.
//! "Obbligatorio" or "A scelta") with exam rows of five
//! cells: name, credits, hours, language and subject code.

use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::{CatalogError, Result};
use crate::types::{Exam, ExamTotals, Section, Semester};

use super::text::{element_text, first_number, resolve_url};

/// Number of cells an exam row must have
pub const EXAM_ROW_CELLS: usize = 5;

/// Classify a section row by its text.
///
/// Returns `None` for section rows that name neither group; the caller keeps
/// the previous section in that case.
pub fn classify_section(text: &str) -> Option<Section> {
    let lower = text.to_lowercase();
    if lower.contains("obbligatorio") {
        Some(Section::Obligatory)
    } else if lower.contains("scelta") || lower.contains("opzional") {
        Some(Section::Optional)
    } else {
        None
    }
}

/// Parse all exam rows of one table into the open semester.
///
/// Rows are taken from the table's first `tbody`. HTML5 parsing wraps bare
/// `tr` children of a table in an implied `tbody`, so such tables are read
/// too; rows in `thead` and `tfoot` are not.
///
/// Every parsed exam is appended to `semester` and folded into `totals`.
/// Rows seen before the first recognised section row are dropped, as are rows
/// with fewer than five cells.
///
/// # Arguments
/// * `table` - The `<table>` element
/// * `base` - Base URL for exam links
/// * `semester` - Semester receiving the exams
/// * `totals` - Course-level accumulator
pub fn parse_exam_table(
    table: &ElementRef,
    base: &Url,
    semester: &mut Semester,
    totals: &mut ExamTotals,
) {
    let (Ok(tbody_selector), Ok(row_selector), Ok(cell_selector)) = (
        Selector::parse("tbody"),
        Selector::parse("tr"),
        Selector::parse("td"),
    ) else {
        return;
    };

    let Some(tbody) = table.select(&tbody_selector).next() else {
        return;
    };

    let mut section: Option<Section> = None;

    for row in tbody.select(&row_selector) {
        if row.value().classes().any(|c| c == "rowsubtitle") {
            if let Some(next) = classify_section(&element_text(&row)) {
                section = Some(next);
            }
            continue;
        }

        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < EXAM_ROW_CELLS {
            continue;
        }

        let Some(current) = section else {
            log::debug!("Dropping exam row before any section header");
            continue;
        };

        match parse_exam_row(&cells, base) {
            Ok(exam) => {
                totals.record(current, exam.cfu);
                match current {
                    Section::Obligatory => semester.obligatory_exams.push(exam),
                    Section::Optional => semester.optional_exams.push(exam),
                }
            }
            Err(e) => log::warn!("Skipping exam row: {}", e),
        }
    }
}

/// Parse a single exam row.
///
/// Credits and hours are the first digit run of their cell and default to 0.
/// If the name cell holds a link, the link text is the name and the link is
/// resolved against `base`.
///
/// # Errors
/// `CatalogError::RowParse` if fewer than five cells are given.
pub fn parse_exam_row(cells: &[ElementRef], base: &Url) -> Result<Exam> {
    let [name_cell, cfu_cell, hours_cell, language_cell, ssd_cell, ..] = cells else {
        return Err(CatalogError::RowParse(format!(
            "expected {} cells, found {}",
            EXAM_ROW_CELLS,
            cells.len()
        )));
    };

    let (name, link) = match Selector::parse("a")
        .ok()
        .and_then(|selector| name_cell.select(&selector).next())
    {
        Some(anchor) => {
            let href = anchor.value().attr("href").unwrap_or("");
            (element_text(&anchor), Some(resolve_url(base, href)))
        }
        None => (element_text(name_cell), None),
    };

    Ok(Exam {
        name,
        cfu: first_number(&element_text(cfu_cell)).unwrap_or(0),
        hours: first_number(&element_text(hours_cell)).unwrap_or(0),
        language: element_text(language_cell),
        ssd: element_text(ssd_cell),
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SemesterKind;
    use scraper::Html;

    fn base() -> Url {
        Url::parse("https://www.unimi.it").unwrap()
    }

    fn parse_table(html: &str) -> (Semester, ExamTotals) {
        let document = Html::parse_document(html);
        let selector = Selector::parse("table").unwrap();
        let table = document.select(&selector).next().unwrap();

        let mut semester = Semester::new(SemesterKind::First);
        let mut totals = ExamTotals::default();
        parse_exam_table(&table, &base(), &mut semester, &mut totals);
        (semester, totals)
    }

    fn row_cells(html: &str) -> (Html, Selector) {
        (Html::parse_document(html), Selector::parse("td").unwrap())
    }

    #[test]
    fn test_classify_section() {
        assert_eq!(classify_section("Obbligatorio"), Some(Section::Obligatory));
        assert_eq!(
            classify_section("  ATTIVITÀ OBBLIGATORIO "),
            Some(Section::Obligatory)
        );
        assert_eq!(classify_section("A scelta dello studente"), Some(Section::Optional));
        assert_eq!(classify_section("Insegnamenti opzionali"), Some(Section::Optional));
        assert_eq!(classify_section("Lingua inglese"), None);
    }

    #[test]
    fn test_parse_exam_row_with_link() {
        let (document, selector) = row_cells(
            r#"<table><tr>
                <td><a href="/it/insegnamenti/analisi-1"> Analisi matematica I </a></td>
                <td>9 CFU</td><td>72 ore</td><td>Italiano</td><td>MAT/05</td>
            </tr></table>"#,
        );
        let cells: Vec<ElementRef> = document.select(&selector).collect();

        let exam = parse_exam_row(&cells, &base()).unwrap();
        assert_eq!(exam.name, "Analisi matematica I");
        assert_eq!(exam.cfu, 9);
        assert_eq!(exam.hours, 72);
        assert_eq!(exam.language, "Italiano");
        assert_eq!(exam.ssd, "MAT/05");
        assert_eq!(
            exam.link.as_deref(),
            Some("https://www.unimi.it/it/insegnamenti/analisi-1")
        );
    }

    #[test]
    fn test_parse_exam_row_defaults_to_zero() {
        let (document, selector) = row_cells(
            "<table><tr><td>Tirocinio</td><td>-</td><td></td><td>Inglese</td><td></td></tr></table>",
        );
        let cells: Vec<ElementRef> = document.select(&selector).collect();

        let exam = parse_exam_row(&cells, &base()).unwrap();
        assert_eq!(exam.name, "Tirocinio");
        assert_eq!(exam.cfu, 0);
        assert_eq!(exam.hours, 0);
        assert_eq!(exam.ssd, "");
        assert!(exam.link.is_none());
    }

    #[test]
    fn test_parse_exam_row_too_few_cells() {
        let (document, selector) =
            row_cells("<table><tr><td>Analisi</td><td>9</td><td>72</td></tr></table>");
        let cells: Vec<ElementRef> = document.select(&selector).collect();

        match parse_exam_row(&cells, &base()) {
            Err(CatalogError::RowParse(msg)) => assert!(msg.contains("found 3")),
            other => panic!("Expected RowParse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_exam_table_sections() {
        let (semester, totals) = parse_table(
            r#"<table><tbody>
                <tr class="rowsubtitle"><td colspan="5">Obbligatorio</td></tr>
                <tr><td>Analisi I</td><td>9</td><td>72</td><td>Italiano</td><td>MAT/05</td></tr>
                <tr><td>Algebra</td><td>6</td><td>48</td><td>Italiano</td><td>MAT/02</td></tr>
                <tr class="rowsubtitle"><td colspan="5">A scelta</td></tr>
                <tr><td>Logica</td><td>6</td><td>48</td><td>Italiano</td><td>MAT/01</td></tr>
            </tbody></table>"#,
        );

        assert_eq!(semester.obligatory_exams.len(), 2);
        assert_eq!(semester.optional_exams.len(), 1);
        assert_eq!(semester.optional_exams[0].name, "Logica");
        assert_eq!(totals.obligatory_exams, 2);
        assert_eq!(totals.obligatory_cfu, 15);
        assert_eq!(totals.optional_exams, 1);
        assert_eq!(totals.optional_cfu, 6);
    }

    #[test]
    fn test_rows_before_section_header_are_dropped() {
        let (semester, totals) = parse_table(
            r#"<table><tbody>
                <tr><td>Orfano</td><td>6</td><td>48</td><td>Italiano</td><td>INF/01</td></tr>
                <tr class="rowsubtitle"><td>Obbligatorio</td></tr>
                <tr><td>Analisi I</td><td>9</td><td>72</td><td>Italiano</td><td>MAT/05</td></tr>
            </tbody></table>"#,
        );

        assert_eq!(semester.obligatory_exams.len(), 1);
        assert_eq!(semester.obligatory_exams[0].name, "Analisi I");
        assert_eq!(totals.obligatory_exams, 1);
        assert_eq!(totals.optional_exams, 0);
    }

    #[test]
    fn test_short_rows_do_not_affect_totals() {
        let (semester, totals) = parse_table(
            r#"<table><tbody>
                <tr class="rowsubtitle"><td>Obbligatorio</td></tr>
                <tr><td>Nota</td><td>3</td><td>24</td><td>Italiano</td></tr>
                <tr><td colspan="5">Totale 9 CFU</td></tr>
                <tr><td>Analisi I</td><td>9</td><td>72</td><td>Italiano</td><td>MAT/05</td></tr>
            </tbody></table>"#,
        );

        assert_eq!(semester.obligatory_exams.len(), 1);
        assert_eq!(totals.obligatory_exams, 1);
        assert_eq!(totals.obligatory_cfu, 9);
    }

    #[test]
    fn test_unrecognised_section_row_keeps_current_section() {
        let (semester, _) = parse_table(
            r#"<table><tbody>
                <tr class="rowsubtitle"><td>A scelta</td></tr>
                <tr class="rowsubtitle"><td>Gruppo 1</td></tr>
                <tr><td>Logica</td><td>6</td><td>48</td><td>Italiano</td><td>MAT/01</td></tr>
            </tbody></table>"#,
        );

        assert_eq!(semester.optional_exams.len(), 1);
        assert!(semester.obligatory_exams.is_empty());
    }

    #[test]
    fn test_table_without_explicit_tbody_is_read() {
        let (semester, totals) = parse_table(
            r#"<table>
                <thead><tr><td>Insegnamento</td><td>CFU</td><td>Ore</td><td>Lingua</td><td>SSD</td></tr></thead>
                <tr class="rowsubtitle"><td>Obbligatorio</td></tr>
                <tr><td>Analisi I</td><td>9</td><td>72</td><td>Italiano</td><td>MAT/05</td></tr>
            </table>"#,
        );

        assert_eq!(semester.obligatory_exams.len(), 1);
        assert_eq!(semester.obligatory_exams[0].name, "Analisi I");
        assert_eq!(totals.obligatory_cfu, 9);
    }

    #[test]
    fn test_huge_credit_values_saturate() {
        let (semester, totals) = parse_table(
            r#"<table><tbody>
                <tr class="rowsubtitle"><td>Obbligatorio</td></tr>
                <tr><td>Tesi</td><td>4000000000</td><td>0</td><td>Italiano</td><td>-</td></tr>
                <tr><td>Tirocinio</td><td>4000000000</td><td>0</td><td>Italiano</td><td>-</td></tr>
            </tbody></table>"#,
        );

        assert_eq!(semester.obligatory_exams.len(), 2);
        assert_eq!(semester.obligatory_exams[0].cfu, 4_000_000_000);
        assert_eq!(totals.obligatory_exams, 2);
        assert_eq!(totals.obligatory_cfu, u32::MAX);
    }

    #[test]
    fn test_anchor_without_href_links_to_base() {
        let (document, selector) = row_cells(
            "<table><tr><td><a>Prova finale</a></td><td>3</td><td>0</td><td>Italiano</td><td></td></tr></table>",
        );
        let cells: Vec<ElementRef> = document.select(&selector).collect();

        let exam = parse_exam_row(&cells, &base()).unwrap();
        assert_eq!(exam.name, "Prova finale");
        assert_eq!(exam.link.as_deref(), Some("https://www.unimi.it"));
    }

    #[test]
    fn test_table_without_rows_is_empty() {
        let (semester, totals) = parse_table("<table></table>");
        assert!(semester.obligatory_exams.is_empty());
        assert!(semester.optional_exams.is_empty());
        assert_eq!(totals, ExamTotals::default());
    }
}
