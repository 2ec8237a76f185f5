//! Load plan parameter files from disk

use super::PlanParameters;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load and validate a plan from a JSON parameter file
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<PlanParameters, Box<dyn Error>> {
    let file = File::open(path.as_ref())?;
    let params: PlanParameters = serde_json::from_reader(BufReader::new(file))?;
    params.validate()?;
    log::info!(
        "loaded plan from {}: principal ${:.0}, {} months",
        path.as_ref().display(),
        params.mortgage.principal,
        params.mortgage.term_months
    );
    Ok(params)
}

/// Load a plan from any reader (e.g. string buffer, pipe)
pub fn load_plan_from_reader<R: std::io::Read>(reader: R) -> Result<PlanParameters, Box<dyn Error>> {
    let params: PlanParameters = serde_json::from_reader(reader)?;
    params.validate()?;
    Ok(params)
}

/// Write a plan as pretty-printed JSON, usable as a parameter file
pub fn write_plan<P: AsRef<Path>>(path: P, params: &PlanParameters) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, params)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("plan.json");

        let params = PlanParameters::example();
        write_plan(&path, &params).expect("write plan");
        let loaded = load_plan(&path).expect("load plan");

        assert_eq!(loaded, params);
    }

    #[test]
    fn test_invalid_plan_rejected_on_load() {
        let mut params = PlanParameters::example();
        params.mortgage.term_months = 0;

        let json = serde_json::to_string(&params).unwrap();
        let result = load_plan_from_reader(json.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_plan("no_such_plan.json").is_err());
    }
}
