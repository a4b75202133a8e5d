use std::path::Path;

use foodgram_recipe::ImportFormat;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn import_csv_and_json_ignoring_conflicts() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let query = foodgram_recipe::Query(state.read_db.clone());
    let cmd = foodgram_recipe::Command::new(state);

    let csv = dir.child("ingredients.csv");
    std::fs::write(&csv, "name,measurement_unit\nсахар,г\nсахар,ч. л.\nсоль,г\n")?;
    assert_eq!(cmd.import_ingredients(&csv).await?, 3);

    let json = dir.child("ingredients.json");
    std::fs::write(
        &json,
        r#"[{"name":"сахар","measurement_unit":"г"},{"name":"яйца","measurement_unit":"шт."}]"#,
    )?;
    assert_eq!(cmd.import_ingredients(&json).await?, 1);

    let ingredients = query.ingredients("").await?;
    assert_eq!(ingredients.len(), 4);

    let sugar = query.ingredients("сах").await?;
    assert_eq!(sugar.len(), 2);
    assert_eq!(sugar[0].measurement_unit, "г");
    assert_eq!(sugar[1].measurement_unit, "ч. л.");

    Ok(())
}

#[tokio::test]
async fn reject_unsupported_files() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_recipe::Command::new(state);

    let err = cmd.import_ingredients(dir.child("data.xml")).await.unwrap_err();
    assert_eq!(err.to_string(), "unsupported file format");

    let err = cmd
        .import_ingredients_from(ImportFormat::Json, "{not json")
        .await
        .unwrap_err();
    assert!(matches!(err, foodgram_shared::Error::User(_)));

    Ok(())
}

#[test]
fn format_from_extension() {
    assert_eq!(
        ImportFormat::from_path(Path::new("data/ingredients.CSV")).unwrap(),
        ImportFormat::Csv
    );
    assert_eq!(
        ImportFormat::from_path(Path::new("ingredients.json")).unwrap(),
        ImportFormat::Json
    );
    assert!(ImportFormat::from_path(Path::new("ingredients")).is_err());
}
