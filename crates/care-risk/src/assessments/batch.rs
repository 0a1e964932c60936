use std::io::Read;

use serde::de::DeserializeOwned;

use super::error::EvaluationError;
use super::features::AssessmentInput;

/// Read one validated record per CSV row. Rows are numbered from 1, excluding the header.
pub fn read_csv<I, R>(reader: R) -> Result<Vec<I>, EvaluationError>
where
    I: AssessmentInput + DeserializeOwned,
    R: Read,
{
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv.deserialize::<I>().enumerate() {
        let row_number = index + 1;
        let record =
            row.map_err(|err| EvaluationError::schema(I::DOMAIN, format!("row {row_number}: {err}")))?;
        record.validate().map_err(|err| match err {
            EvaluationError::SchemaMismatch { domain, detail } => EvaluationError::SchemaMismatch {
                domain,
                detail: format!("row {row_number}: {detail}"),
            },
            other => other,
        })?;
        records.push(record);
    }

    Ok(records)
}
