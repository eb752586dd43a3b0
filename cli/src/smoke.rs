//! End-to-end CRUD walk-through against a running server.

use crate::client::ApiClient;
use anyhow::{bail, ensure, Context, Result};
use cookbook_core::{IngredientsInput, RecipeRequest};
use reqwest::StatusCode;

pub async fn smoke(server: &str) -> Result<()> {
    let client = ApiClient::new(server);

    let created = client
        .create(&RecipeRequest {
            title: Some("Smoke Test Recipe".to_string()),
            ingredients: IngredientsInput::from("Ingredient 1\n  \nIngredient 2\n"),
            instructions: Some("Test instructions".to_string()),
            image_url: Some("https://example.com/smoke.jpg".to_string()),
        })
        .await
        .context("create")?;
    println!("created {}", created.id);
    ensure!(
        created.ingredients == ["Ingredient 1", "Ingredient 2"],
        "text ingredients were not normalized: {:?}",
        created.ingredients
    );

    let recipes = client.list().await.context("list")?;
    ensure!(
        recipes.first().map(|r| r.id) == Some(created.id),
        "newest recipe is not listed first"
    );
    println!("listed {} recipes", recipes.len());

    let fetched = client.get(created.id).await.context("get")?;
    ensure!(fetched == created, "fetched recipe differs from created one");

    let updated = client
        .update(
            created.id,
            &RecipeRequest {
                title: Some(format!("{} (Updated)", created.title)),
                ingredients: IngredientsInput::from(created.ingredients.clone()),
                instructions: Some(format!(
                    "{}\nLet cool slightly before serving",
                    created.instructions
                )),
                image_url: None,
            },
        )
        .await
        .context("update")?;
    ensure!(updated.created_at == created.created_at, "update changed createdAt");
    ensure!(
        updated.image_url.is_empty(),
        "omitted imageURL was kept: {}",
        updated.image_url
    );
    println!("updated {}", updated.title);

    client.delete(created.id).await.context("delete")?;
    println!("deleted {}", created.id);

    match client.delete(created.id).await {
        Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {}
        Err(e) => return Err(e).context("second delete"),
        Ok(_) => bail!("second delete of {} succeeded", created.id),
    }

    println!("All operations completed successfully!");
    Ok(())
}
