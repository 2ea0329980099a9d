use crate::dataset::CourseRow;

/// Label of the selection that disables a filter.
pub const ALL: &str = "Todas";

/// Up to three equality filters; `None` means the `Todas` selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub area: Option<String>,
    pub fonte: Option<String>,
    pub duracao: Option<String>,
}

impl FilterSelection {
    /// Interpret a UI label, folding the `Todas` selection into `None`.
    pub fn from_labels(area: Option<String>, fonte: Option<String>, duracao: Option<String>) -> Self {
        let fold = |label: Option<String>| label.filter(|l| l != ALL);
        Self {
            area: fold(area),
            fonte: fold(fonte),
            duracao: fold(duracao),
        }
    }

    pub fn matches(&self, row: &CourseRow) -> bool {
        let eq = |selected: &Option<String>, value: &str| {
            selected.as_deref().is_none_or(|s| s == value)
        };
        eq(&self.area, &row.area) && eq(&self.fonte, &row.fonte) && eq(&self.duracao, &row.duracao)
    }
}

/// Filtered copy of the dataset, original order preserved.
pub fn apply(rows: &[CourseRow], selection: &FilterSelection) -> Vec<CourseRow> {
    rows.iter()
        .filter(|row| selection.matches(row))
        .cloned()
        .collect()
}

/// Selection options for one column: `Todas` followed by the sorted unique
/// values present in the dataset.
pub fn options(rows: &[CourseRow], column: impl Fn(&CourseRow) -> &str) -> Vec<String> {
    let mut values: Vec<String> = rows
        .iter()
        .map(|row| column(row).to_string())
        .filter(|v| !v.is_empty())
        .collect();
    values.sort();
    values.dedup();

    let mut out = Vec::with_capacity(values.len() + 1);
    out.push(ALL.to_string());
    out.extend(values);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(titulo: &str, area: &str, fonte: &str, duracao: &str) -> CourseRow {
        CourseRow {
            titulo: titulo.into(),
            area: area.into(),
            fonte: fonte.into(),
            duracao: duracao.into(),
            nivel: String::new(),
            link: None,
        }
    }

    fn sample() -> Vec<CourseRow> {
        vec![
            row("Excel Avançado", "Dados", "Escola Virtual", "4 horas"),
            row("Python 101", "Programação", "Escola Virtual", "8 horas"),
            row("Gestão de Projetos", "Gestão", "FGV", "4 horas"),
        ]
    }

    #[test]
    fn default_selection_keeps_everything() {
        let rows = sample();
        assert_eq!(apply(&rows, &FilterSelection::default()).len(), 3);
    }

    #[test]
    fn each_filter_is_an_equality_match() {
        let rows = sample();

        let by_area = FilterSelection {
            area: Some("Dados".into()),
            ..Default::default()
        };
        assert_eq!(apply(&rows, &by_area).len(), 1);

        let by_fonte = FilterSelection {
            fonte: Some("Escola Virtual".into()),
            ..Default::default()
        };
        assert_eq!(apply(&rows, &by_fonte).len(), 2);

        let by_duracao = FilterSelection {
            duracao: Some("4 horas".into()),
            ..Default::default()
        };
        assert_eq!(apply(&rows, &by_duracao).len(), 2);
    }

    #[test]
    fn filters_combine_conjunctively() {
        let rows = sample();
        let selection = FilterSelection {
            fonte: Some("Escola Virtual".into()),
            duracao: Some("4 horas".into()),
            ..Default::default()
        };

        let filtered = apply(&rows, &selection);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].titulo, "Excel Avançado");
    }

    #[test]
    fn todas_label_disables_a_filter() {
        let selection = FilterSelection::from_labels(
            Some(ALL.into()),
            Some("FGV".into()),
            Some(ALL.into()),
        );

        assert_eq!(selection.area, None);
        assert_eq!(selection.fonte.as_deref(), Some("FGV"));
        assert_eq!(selection.duracao, None);
    }

    #[test]
    fn no_matches_is_an_empty_set_not_an_error() {
        let rows = sample();
        let selection = FilterSelection {
            area: Some("Culinária".into()),
            ..Default::default()
        };
        assert!(apply(&rows, &selection).is_empty());
    }

    #[test]
    fn options_are_sorted_unique_behind_todas() {
        let rows = sample();

        let areas = options(&rows, |r| &r.area);

        assert_eq!(areas, vec!["Todas", "Dados", "Gestão", "Programação"]);
    }

    #[test]
    fn filtered_rows_keep_dataset_order() {
        let rows = sample();
        let selection = FilterSelection {
            duracao: Some("4 horas".into()),
            ..Default::default()
        };

        let filtered = apply(&rows, &selection);
        let titles: Vec<&str> = filtered.iter().map(|r| r.titulo.as_str()).collect();

        assert_eq!(titles, vec!["Excel Avançado", "Gestão de Projetos"]);
    }
}
