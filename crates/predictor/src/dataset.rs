use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;

use crate::errors::PredictorError;

pub const SUCCESS_STATUS: &str = "Succeeded";

/// One row of the startup dataset; extra CSV columns are ignored.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StartupRecord {
    pub founded_year: f64,
    pub funding_usd: f64,
    pub industry: String,
    pub country: String,
    pub status: String,
}

impl StartupRecord {
    pub fn succeeded(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<StartupRecord>, PredictorError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let records = rdr
        .deserialize::<StartupRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    if records.is_empty() {
        return Err(PredictorError::Dataset("dataset has no rows".into()));
    }
    Ok(records)
}

pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<StartupRecord>, PredictorError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| PredictorError::Dataset(format!("{} not readable: {e}", path.display())))?;
    read_records(file)
}

/// Shuffled split returning `(train, test)`; the test side holds ceil(n * test_size) rows.
pub fn train_test_split<T: Clone>(items: &[T], test_size: f64, seed: u64) -> Result<(Vec<T>, Vec<T>), PredictorError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PredictorError::Dataset(format!("test_size {test_size} must be in (0, 1)")));
    }
    let n = items.len();
    let n_test = (n as f64 * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(PredictorError::Dataset(format!(
            "{n} rows cannot be split with test_size {test_size}"
        )));
    }
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));
    let test = order[..n_test].iter().map(|&i| items[i].clone()).collect();
    let train = order[n_test..].iter().map(|&i| items[i].clone()).collect();
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
name,founded_year,funding_usd,industry,country,status
Acme,2015,2500000,IT,USA,Succeeded
Beta,2018, 40000 ,Agro,India,Failed
Gamma,2012,900000,Fintech,UK,Operating
";

    #[test]
    fn parses_rows_and_ignores_extra_columns() -> Result<(), PredictorError> {
        let rows = read_records(CSV.as_bytes())?;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].funding_usd, 40000.0);
        assert!(rows[0].succeeded());
        assert!(!rows[2].succeeded());
        Ok(())
    }

    #[test]
    fn malformed_or_empty_csv_fails() {
        assert!(read_records("founded_year,funding_usd,industry,country,status\nx,1,IT,USA,Failed\n".as_bytes()).is_err());
        assert!(read_records("founded_year,funding_usd,industry,country,status\n".as_bytes()).is_err());
        assert!(load_csv("/definitely/not/here.csv").is_err());
    }

    #[test]
    fn split_sizes_and_determinism() -> Result<(), PredictorError> {
        let items: Vec<u32> = (0..11).collect();
        let (train, test) = train_test_split(&items, 0.2, 42)?;
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 8);
        let (train2, test2) = train_test_split(&items, 0.2, 42)?;
        assert_eq!((train.clone(), test.clone()), (train2, test2));

        let mut all: Vec<u32> = train.into_iter().chain(test).collect();
        all.sort();
        assert_eq!(all, items);
        Ok(())
    }

    #[test]
    fn split_rejects_degenerate_inputs() {
        assert!(train_test_split(&[1], 0.2, 1).is_err());
        assert!(train_test_split(&[1, 2, 3], 0.0, 1).is_err());
    }
}
