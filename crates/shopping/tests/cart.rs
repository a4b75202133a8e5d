use foodgram_shopping::{CartSnapshot, CartStore, SqliteCartStore};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn add_and_remove_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let john = helpers::create_user(&state, "john").await?;
    let sugar = helpers::create_ingredient(&state, "сахар", "г").await?;
    let recipe = helpers::create_recipe(&state, &john, "Компот", &[(sugar.as_str(), 100)]).await?;
    let store = SqliteCartStore(state.read_db.clone());
    let cmd = foodgram_shopping::Command::new(state);

    cmd.add_to_cart(&john, &recipe).await?;

    let err = cmd.add_to_cart(&john, &recipe).await.unwrap_err();
    assert_eq!(err.to_string(), "recipe already in shopping cart");

    let snapshot = store.snapshot(&john).await?;
    assert_eq!(snapshot.recipes.len(), 1);
    assert_eq!(snapshot.recipes[0].author, "john");
    assert_eq!(snapshot.components.len(), 1);
    assert_eq!(snapshot.components[0].amount, 100);

    cmd.remove_from_cart(&john, &recipe).await?;

    let err = cmd.remove_from_cart(&john, &recipe).await.unwrap_err();
    assert_eq!(err.to_string(), "recipe not in shopping cart");

    assert_eq!(store.snapshot(&john).await?, CartSnapshot::default());

    Ok(())
}

#[tokio::test]
async fn add_unknown_recipe() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let john = helpers::create_user(&state, "john").await?;
    let cmd = foodgram_shopping::Command::new(state);

    let err = cmd.add_to_cart(&john, "unknown").await.unwrap_err();
    assert_eq!(err.to_string(), "recipe not found");

    Ok(())
}

#[tokio::test]
async fn carts_are_per_user_and_follow_recipe_deletion() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let john = helpers::create_user(&state, "john").await?;
    let albert = helpers::create_user(&state, "albert").await?;
    let sugar = helpers::create_ingredient(&state, "сахар", "г").await?;
    let recipe = helpers::create_recipe(&state, &john, "Компот", &[(sugar.as_str(), 100)]).await?;
    let store = SqliteCartStore(state.read_db.clone());
    let recipes = foodgram_recipe::Command::new(state.clone());
    let cmd = foodgram_shopping::Command::new(state);

    cmd.add_to_cart(&albert, &recipe).await?;
    assert!(store.snapshot(&john).await?.recipes.is_empty());
    assert_eq!(store.snapshot(&albert).await?.recipes[0].author, "john");

    recipes.delete(&recipe, &john).await?;
    assert!(store.snapshot(&albert).await?.recipes.is_empty());

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_and_removes_report_user_errors() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let john = helpers::create_user(&state, "john").await?;
    let sugar = helpers::create_ingredient(&state, "сахар", "г").await?;
    let cmd = foodgram_shopping::Command::new(state.clone());

    for name in ["Компот", "Морс", "Кисель", "Варенье", "Джем"] {
        let recipe = helpers::create_recipe(&state, &john, name, &[(sugar.as_str(), 100)]).await?;

        let (first, second) = tokio::join!(
            cmd.add_to_cart(&john, &recipe),
            cmd.add_to_cart(&john, &recipe)
        );
        let errors = [first, second]
            .into_iter()
            .filter_map(Result::err)
            .collect::<Vec<_>>();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            foodgram_shared::Error::User(msg) if msg == "recipe already in shopping cart"
        ));

        let (first, second) = tokio::join!(
            cmd.remove_from_cart(&john, &recipe),
            cmd.remove_from_cart(&john, &recipe)
        );
        let errors = [first, second]
            .into_iter()
            .filter_map(Result::err)
            .collect::<Vec<_>>();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            foodgram_shared::Error::User(msg) if msg == "recipe not in shopping cart"
        ));
    }

    Ok(())
}
