use std::io::Read;
use std::path::Path;

use tracing::warn;

use super::domain::ProfileSubmission;

#[derive(Debug)]
pub enum ProfileImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ProfileImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileImportError::Io(err) => write!(f, "failed to read profile export: {}", err),
            ProfileImportError::Csv(err) => write!(f, "invalid profile CSV data: {}", err),
        }
    }
}

impl std::error::Error for ProfileImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProfileImportError::Io(err) => Some(err),
            ProfileImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ProfileImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ProfileImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One CSV row together with its 1-based data line number.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedProfile {
    pub row: usize,
    pub submission: ProfileSubmission,
}

/// Row that could not be read as a submission, such as an unknown label or a
/// fractional value in an integer column.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub row: usize,
    pub reason: String,
}

/// Outcome of reading an export. Unreadable rows are set aside so the rest of
/// the batch can still be scored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileBatch {
    pub profiles: Vec<ImportedProfile>,
    pub rejected: Vec<RejectedRow>,
}

impl ProfileBatch {
    /// Total number of data rows read, accepted or not.
    pub fn len(&self) -> usize {
        self.profiles.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads intake submissions from CSV with camelCase field headers. Blank cells
/// and missing columns are left unset for the validator to report.
pub struct ProfileImporter;

impl ProfileImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ProfileBatch, ProfileImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ProfileBatch, ProfileImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut batch = ProfileBatch::default();

        for (index, record) in csv_reader.deserialize::<ProfileSubmission>().enumerate() {
            let row = index + 1;
            match record {
                Ok(submission) => batch.profiles.push(ImportedProfile { row, submission }),
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => {
                    warn!(row, error = %err, "skipping unreadable profile row");
                    batch.rejected.push(RejectedRow {
                        row,
                        reason: deserialize_reason(&err),
                    });
                }
            }
        }

        Ok(batch)
    }
}

fn deserialize_reason(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::{FamilyHistory, SmokingStatus};
    use std::io::Cursor;

    const HEADER: &str = "age,gender,bmi,bloodPressureSystolic,bloodPressureDiastolic,cholesterolLevel,glucoseLevel,smokingStatus,alcoholConsumption,physicalActivity,familyHistory";

    #[test]
    fn reads_complete_rows() {
        let data = format!(
            "{HEADER}\n45,female,28.4,135,88,230,115,occasional,moderate,light,diabetes\n"
        );

        let rows = ProfileImporter::from_reader(Cursor::new(data)).expect("csv parses");

        assert_eq!(rows.len(), 1);
        assert!(rows.rejected.is_empty());
        let submission = &rows.profiles[0].submission;
        assert_eq!(rows.profiles[0].row, 1);
        assert_eq!(submission.age, Some(45));
        assert_eq!(submission.bmi, Some(28.4));
        assert_eq!(submission.smoking_status, Some(SmokingStatus::Occasional));
        assert_eq!(submission.family_history, Some(FamilyHistory::Diabetes));
    }

    #[test]
    fn blank_cells_are_left_unset() {
        let data = format!(
            "{HEADER}\n52,male,31,150,95,250,,regular,heavy,sedentary,multiple\n"
        );

        let rows = ProfileImporter::from_reader(Cursor::new(data)).expect("csv parses");

        assert_eq!(rows.profiles[0].submission.glucose_level, None);
        assert_eq!(rows.profiles[0].submission.bmi, Some(31.0));
    }

    #[test]
    fn unreadable_rows_do_not_abort_the_batch() {
        let data = format!(
            "{HEADER}\n\
             45,female,28,135,88,230,115,occasional,moderate,light,diabetes\n\
             52,male,31,150,95,250,120,sometimes,heavy,sedentary,multiple\n\
             30,male,25,120,80,200,100,no,moderate,moderate,no\n"
        );

        let batch = ProfileImporter::from_reader(Cursor::new(data)).expect("csv parses");

        assert_eq!(batch.len(), 3);
        let accepted: Vec<usize> = batch.profiles.iter().map(|profile| profile.row).collect();
        assert_eq!(accepted, vec![1, 3]);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].row, 2);
        assert!(
            batch.rejected[0].reason.contains("sometimes"),
            "{}",
            batch.rejected[0].reason
        );
    }

    #[test]
    fn fractional_integers_are_rejected_per_row() {
        let data = format!(
            "{HEADER}\n\
             45.5,female,28,135,88,230,115,occasional,moderate,light,diabetes\n\
             30,male,25,120,80,200,100,no,moderate,moderate,no\n"
        );

        let batch = ProfileImporter::from_reader(Cursor::new(data)).expect("csv parses");

        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].row, 1);
        assert_eq!(batch.profiles.len(), 1);
        assert_eq!(batch.profiles[0].submission.age, Some(30));
    }
}
