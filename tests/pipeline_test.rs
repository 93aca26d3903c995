use anyhow::Result;
use contact_scrubber::config::ScrubConfig;
use contact_scrubber::source;
use contact_scrubber::verify::verify;
use contact_scrubber::{sink, CheckOutcome, Pipeline, ScrubError, Value};
use std::fs;
use std::io::Write;
use tempfile::tempdir;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_migration_batch_end_to_end() -> Result<()> {
    let dir = tempdir()?;
    let input = write_file(
        &dir,
        "contacts.csv",
        "First Name,Middle Name,Last Name,Date of Birth,Assigned\n\
         jOHN,ALLEN,smith,3/5/1990,AA\n\
         mary,beth,JONES,\"December 1, 1985\",TM\n\
         pat,lee,obrien,1988-07-04,ZZ\n\
         mary,beth,JONES,\"December 1, 1985\",TM\n\
         sam,kim,lowe,07/04/76,IC\n",
    );
    let output = dir.path().join("cleaned.csv");

    let records = source::open(&input)?.load()?;
    assert_eq!(records.len(), 5);

    let outcome = Pipeline::new(ScrubConfig::default())?.run(records)?;
    sink::write_csv(&outcome.records, &output)?;

    let written = fs::read_to_string(&output)?;
    assert_eq!(
        written,
        "Contact: First Name,Contact: Middle Name,Contact: Last Name,\
         Contact: Date of Birth,Contact: Assigned,Contact: ID\n\
         John,Allen,Smith,03/05/1990,Aaron Artsen,1\n\
         Mary,Beth,Jones,12/01/1985,Tim Mint,2\n\
         Pat,Lee,Obrien,07/04/1988,Gabe Michel,3\n\
         Sam,Kim,Lowe,07/04/1976,Individual Contributor,4\n"
    );
    assert!(outcome.report.all_passed());

    // The written file verifies clean when checked again, the same way
    // the verify subcommand would
    let reloaded = source::open(&output)?.load()?;
    assert_eq!(reloaded.len(), 4);
    assert!(verify(&reloaded, "Contact: ID").all_passed());
    Ok(())
}

#[test]
fn test_empty_name_aborts_run_with_location() -> Result<()> {
    let dir = tempdir()?;
    let input = write_file(
        &dir,
        "contacts.csv",
        "First Name,Middle Name,Last Name,Date of Birth,Assigned\n\
         ann,b,cole,1/1/1990,AA\n\
         ,b,cole,2/2/1991,BL\n",
    );

    let records = source::open(&input)?.load()?;
    let err = Pipeline::new(ScrubConfig::default())?
        .run(records)
        .unwrap_err();
    match err {
        ScrubError::EmptyName { column, row } => {
            assert_eq!(column, "Contact: First Name");
            assert_eq!(row, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_unparseable_date_names_offending_value() -> Result<()> {
    let dir = tempdir()?;
    let input = write_file(
        &dir,
        "contacts.csv",
        "First Name,Middle Name,Last Name,Date of Birth,Assigned\n\
         ann,b,cole,soon,AA\n",
    );

    let records = source::open(&input)?.load()?;
    let err = Pipeline::new(ScrubConfig::default())?
        .run(records)
        .unwrap_err();
    match err {
        ScrubError::UnparseableDate { value, column, row } => {
            assert_eq!(value, "soon");
            assert_eq!(column, "Contact: Date of Birth");
            assert_eq!(row, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_config_file_overrides_defaults() -> Result<()> {
    let dir = tempdir()?;
    let config_path = write_file(
        &dir,
        "scrub.toml",
        "[dates]\n\
         day_first = true\n\
         \n\
         [assignment]\n\
         default = \"Unassigned\"\n\
         \n\
         [assignment.codes]\n\
         XY = \"Xavier Young\"\n",
    );
    let input = write_file(
        &dir,
        "contacts.csv",
        "First Name,Middle Name,Last Name,Date of Birth,Assigned\n\
         ann,b,cole,5/3/1990,XY\n\
         ben,c,dole,6/4/1991,AA\n",
    );

    let config = ScrubConfig::load(&config_path)?;
    let records = source::open(&input)?.load()?;
    let outcome = Pipeline::new(config)?.run(records)?;

    // Day-first: 5/3 is the 5th of March
    assert_eq!(
        outcome.records.value(0, "Contact: Date of Birth"),
        Some(&Value::Text("03/05/1990".to_string()))
    );
    assert_eq!(
        outcome.records.value(0, "Contact: Assigned"),
        Some(&Value::Text("Xavier Young".to_string()))
    );
    // A codes table in the config replaces the built-in one wholesale
    assert_eq!(
        outcome.records.value(1, "Contact: Assigned"),
        Some(&Value::Text("Unassigned".to_string()))
    );
    Ok(())
}

#[test]
fn test_invalid_output_format_rejected_before_any_processing() -> Result<()> {
    let dir = tempdir()?;
    let config_path = write_file(&dir, "scrub.toml", "[dates]\noutput_format = \"%Q\"\n");

    let config = ScrubConfig::load(&config_path)?;
    let err = Pipeline::new(config).unwrap_err();
    assert!(matches!(err, ScrubError::Config(_)));
    Ok(())
}

#[test]
fn test_verify_flags_doctored_output() -> Result<()> {
    // A hand-edited "cleaned" file with a repeated ID and a hole
    let dir = tempdir()?;
    let path = write_file(
        &dir,
        "cleaned.csv",
        "Contact: First Name,Contact: ID\n\
         Ann,1\n\
         Ben,1\n\
         ,3\n",
    );

    let records = source::open(&path)?.load()?;
    let report = verify(&records, "Contact: ID");
    assert_eq!(report.duplicate_ids, CheckOutcome::Warning { count: 1 });
    assert_eq!(report.missing_values, CheckOutcome::Warning { count: 1 });
    assert_eq!(report.duplicate_rows, CheckOutcome::Pass);
    assert!(!report.all_passed());
    Ok(())
}

#[test]
fn test_unsupported_input_format_rejected() {
    let err = source::open(std::path::Path::new("contacts.parquet")).unwrap_err();
    assert!(matches!(err, ScrubError::Load(_)));
}

#[test]
fn test_missing_required_column_fails_fast() -> Result<()> {
    let dir = tempdir()?;
    let input = write_file(
        &dir,
        "contacts.csv",
        "First Name,Last Name,Date of Birth,Assigned\nann,cole,1/1/1990,AA\n",
    );

    let records = source::open(&input)?.load()?;
    let err = Pipeline::new(ScrubConfig::default())?
        .run(records)
        .unwrap_err();
    assert!(matches!(err, ScrubError::SchemaMismatch(c) if c == "Middle Name"));
    Ok(())
}
