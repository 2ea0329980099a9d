use crate::dataset::CourseRow;
use std::fmt::Write;

/// How the filtered rows are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Table,
    Cards,
}

/// Result-count line shown above the listing.
pub fn render_summary(count: usize) -> String {
    format!("<h3>{count} cursos encontrados para você.</h3>")
}

/// Render the filtered rows as an HTML table with the display column names.
/// The link column is a clickable anchor opening in a new viewing context,
/// or the literal `N/A` when the row carries no link.
pub fn render_table(rows: &[CourseRow]) -> String {
    let mut html = String::from(
        "<table>\n<thead><tr>\
         <th>Título do Curso</th>\
         <th>Área Principal</th>\
         <th>Instituição</th>\
         <th>Duração</th>\
         <th>Link</th>\
         </tr></thead>\n<tbody>\n",
    );

    for row in rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&row.titulo),
            escape(&row.area),
            escape(&row.fonte),
            escape(&row.duracao),
            link_cell(row.link.as_deref()),
        );
    }

    html.push_str("</tbody>\n</table>");
    html
}

/// Card-grid variant of the listing.
pub fn render_cards(rows: &[CourseRow]) -> String {
    let mut html = String::from("<div class=\"card-grid\">\n");

    for row in rows {
        let _ = write!(
            html,
            "<article class=\"course-card\">\
             <h4>{}</h4>\
             <p>{} · {}</p>\
             <p>{}{}</p>\
             <p>{}</p>\
             </article>\n",
            escape(&row.titulo),
            escape(&row.area),
            escape(&row.fonte),
            escape(&row.duracao),
            if row.nivel.is_empty() {
                String::new()
            } else {
                format!(" · {}", escape(&row.nivel))
            },
            link_cell(row.link.as_deref()),
        );
    }

    html.push_str("</div>");
    html
}

fn link_cell(link: Option<&str>) -> String {
    match link {
        Some(url) => format!(
            "<a href=\"{}\" target=\"_blank\">Acessar Curso ➔</a>",
            escape(url)
        ),
        None => "N/A".to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked_row() -> CourseRow {
        CourseRow {
            titulo: "Excel Avançado".into(),
            area: "Dados".into(),
            fonte: "Escola Virtual".into(),
            duracao: "4 horas".into(),
            nivel: "Básico".into(),
            link: Some("https://www.ev.org.br/cursos/excel".into()),
        }
    }

    fn linkless_row() -> CourseRow {
        CourseRow {
            link: None,
            ..linked_row()
        }
    }

    #[test]
    fn table_has_display_headers_and_one_row_per_course() {
        let html = render_table(&[linked_row(), linkless_row()]);

        assert!(html.contains("<th>Título do Curso</th>"));
        assert!(html.contains("<th>Instituição</th>"));
        assert_eq!(html.matches("<tr><td>").count(), 2);
    }

    #[test]
    fn links_open_in_a_new_viewing_context() {
        let html = render_table(&[linked_row()]);

        assert!(html.contains(
            "<a href=\"https://www.ev.org.br/cursos/excel\" target=\"_blank\">Acessar Curso ➔</a>"
        ));
    }

    #[test]
    fn linkless_rows_show_na() {
        let html = render_table(&[linkless_row()]);

        assert!(html.contains("<td>N/A</td>"));
        assert!(!html.contains("<a href"));
    }

    #[test]
    fn text_cells_are_escaped() {
        let mut row = linked_row();
        row.titulo = "Excel <b>&</b> Power BI".into();

        let html = render_table(&[row]);

        assert!(html.contains("Excel &lt;b&gt;&amp;&lt;/b&gt; Power BI"));
    }

    #[test]
    fn cards_carry_level_when_present() {
        let html = render_cards(&[linked_row(), linkless_row()]);

        assert!(html.contains("card-grid"));
        assert!(html.contains("4 horas · Básico"));
        assert_eq!(html.matches("<article").count(), 2);
    }

    #[test]
    fn summary_counts_the_filtered_rows() {
        assert_eq!(
            render_summary(12),
            "<h3>12 cursos encontrados para você.</h3>"
        );
    }
}
