use oportuna_common::{CourseRecord, NA};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Focus area assigned to rows the classifier left unlabeled.
pub const AREA_FALLBACK: &str = "Outras";
/// Duration shown for rows with no duration information.
pub const DURATION_FALLBACK: &str = "Não Informada";

/// One row of the dataset the shell filters and renders.
///
/// The classified CSV column `Categoria_NLP` arrives renamed to `area`, and
/// the two fallback fills are applied on load, so downstream code never sees
/// a missing area or duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRow {
    pub titulo: String,
    pub area: String,
    pub fonte: String,
    pub duracao: String,
    pub nivel: String,
    /// Absent when the source carried no usable link.
    pub link: Option<String>,
}

/// Column layout of `cursos_classificados.csv`.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Titulo")]
    titulo: String,
    #[serde(rename = "Categoria_NLP", default)]
    categoria_nlp: Option<String>,
    #[serde(rename = "Fonte", default)]
    fonte: Option<String>,
    #[serde(rename = "Duracao", default)]
    duracao: Option<String>,
    #[serde(rename = "Nivel", default)]
    nivel: Option<String>,
    #[serde(rename = "Link", default)]
    link: Option<String>,
}

impl RawRow {
    fn into_row(self) -> CourseRow {
        CourseRow {
            titulo: self.titulo,
            area: fill(self.categoria_nlp, AREA_FALLBACK),
            fonte: self.fonte.unwrap_or_default(),
            duracao: fill(self.duracao, DURATION_FALLBACK),
            nivel: self.nivel.unwrap_or_default(),
            link: self.link.filter(|l| !l.trim().is_empty() && l != NA),
        }
    }
}

/// Treat empty cells the way the classifier's CSV writer leaves them: as
/// missing values replaced by the fallback.
fn fill(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("arquivo de cursos não encontrado: {0}")]
    NotFound(PathBuf),
    #[error("failed to read dataset: {0}")]
    Io(#[from] io::Error),
    #[error("failed to decode dataset row: {0}")]
    Decode(#[from] csv::Error),
}

/// Load the classified dataset, renaming and filling as described on
/// [`CourseRow`]. A missing file is its own error variant so the caller can
/// present it as a user-facing message rather than a stack of I/O context.
pub fn load_classified(path: &Path) -> Result<Vec<CourseRow>, DatasetError> {
    let file = match std::fs::File::open(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }
        other => other?,
    };

    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let raw: RawRow = result?;
        rows.push(raw.into_row());
    }

    debug!(target: "shell.dataset", path = %path.display(), rows = rows.len(), "dataset loaded");
    Ok(rows)
}

/// Build shell rows straight from a live scrape, attaching the fixed
/// source-derived institution label. Sentinel fields map onto the same
/// fallbacks the CSV path uses.
pub fn from_scraped(records: &[CourseRecord], source_label: &str) -> Vec<CourseRow> {
    records
        .iter()
        .map(|record| CourseRow {
            titulo: record.title.clone(),
            area: AREA_FALLBACK.to_string(),
            fonte: source_label.to_string(),
            duracao: if record.duration == NA {
                DURATION_FALLBACK.to_string()
            } else {
                record.duration.clone()
            },
            nivel: if record.level == NA {
                String::new()
            } else {
                record.level.clone()
            },
            link: (record.link != NA).then(|| record.link.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn renames_and_fills_on_load() {
        let file = write_csv(
            "Titulo,Categoria_NLP,Fonte,Duracao,Nivel,Link\n\
             Excel Avançado,Dados,Escola Virtual,4 horas,Básico,https://www.ev.org.br/cursos/excel\n\
             Curso Sem Rótulo,,FGV,,,\n",
        );

        let rows = load_classified(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].area, "Dados");
        assert_eq!(rows[1].area, AREA_FALLBACK);
        assert_eq!(rows[1].duracao, DURATION_FALLBACK);
        assert_eq!(rows[1].link, None);
    }

    #[test]
    fn missing_file_is_a_dedicated_error() {
        let err = load_classified(Path::new("/definitely/not/cursos.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound(_)));
    }

    #[test]
    fn scraped_records_become_rows_with_the_source_label() {
        let records = vec![
            CourseRecord {
                title: "Excel Avançado".into(),
                duration: "4 horas".into(),
                level: "Básico".into(),
                link: "https://www.ev.org.br/cursos/excel".into(),
            },
            CourseRecord {
                title: "Sem Detalhes".into(),
                duration: NA.into(),
                level: NA.into(),
                link: NA.into(),
            },
        ];

        let rows = from_scraped(&records, "Escola Virtual");

        assert_eq!(rows[0].fonte, "Escola Virtual");
        assert_eq!(rows[0].duracao, "4 horas");
        assert_eq!(rows[1].duracao, DURATION_FALLBACK);
        assert_eq!(rows[1].link, None);
        assert_eq!(
            rows[0].link.as_deref(),
            Some("https://www.ev.org.br/cursos/excel")
        );
    }

    #[test]
    fn sentinel_links_in_the_csv_are_dropped() {
        let file = write_csv(
            "Titulo,Categoria_NLP,Fonte,Duracao,Nivel,Link\n\
             Curso,Dados,FGV,2 horas,,N/A\n",
        );

        let rows = load_classified(file.path()).unwrap();

        assert_eq!(rows[0].link, None);
    }
}
