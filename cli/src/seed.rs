use crate::client::ApiClient;
use anyhow::{Context, Result};
use cookbook_core::{IngredientsInput, RecipeRequest};

pub struct SeedRecipe {
    pub title: &'static str,
    pub ingredients: &'static [&'static str],
    pub instructions: &'static str,
    pub image_url: &'static str,
}

impl SeedRecipe {
    pub fn to_request(&self) -> RecipeRequest {
        RecipeRequest {
            title: Some(self.title.to_string()),
            ingredients: IngredientsInput::from(
                self.ingredients
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>(),
            ),
            instructions: Some(self.instructions.to_string()),
            image_url: Some(self.image_url.to_string()),
        }
    }
}

pub const SAMPLE_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        title: "Classic Chocolate Chip Cookies",
        ingredients: &[
            "2 1/4 cups all-purpose flour",
            "1 cup butter, softened",
            "3/4 cup sugar",
            "3/4 cup brown sugar",
            "2 large eggs",
            "1 tsp vanilla extract",
            "1 tsp baking soda",
            "1/2 tsp salt",
            "2 cups chocolate chips",
        ],
        instructions: "1. Preheat oven to 375°F (190°C)
2. Cream butter and sugars
3. Beat in eggs and vanilla
4. Mix dry ingredients, then combine
5. Stir in chocolate chips
6. Drop rounded tablespoons onto baking sheets
7. Bake 9-11 minutes until golden",
        image_url: "https://images.unsplash.com/photo-1499636136210-6f4ee915583e",
    },
    SeedRecipe {
        title: "Garden Fresh Caprese Salad",
        ingredients: &[
            "4 ripe tomatoes, sliced",
            "Fresh mozzarella, sliced",
            "Fresh basil leaves",
            "Extra virgin olive oil",
            "Balsamic vinegar",
            "Sea salt",
            "Fresh ground pepper",
        ],
        instructions: "1. Arrange alternating slices of tomato and mozzarella
2. Tuck basil leaves between slices
3. Drizzle with olive oil and balsamic
4. Season with salt and pepper
5. Serve immediately",
        image_url: "https://images.unsplash.com/photo-1498579397066-22750a3cb424",
    },
    SeedRecipe {
        title: "Homemade Margherita Pizza",
        ingredients: &[
            "Pizza dough",
            "San Marzano tomatoes",
            "Fresh mozzarella",
            "Fresh basil",
            "Extra virgin olive oil",
            "Salt",
        ],
        instructions: "1. Preheat oven to 500°F with pizza stone
2. Stretch dough into circle
3. Top with crushed tomatoes
4. Add torn mozzarella pieces
5. Bake until crust is golden
6. Top with fresh basil and olive oil",
        image_url: "https://images.unsplash.com/photo-1574071318508-1cdbab80d002",
    },
];

pub async fn seed(server: &str) -> Result<()> {
    let client = ApiClient::new(server);

    println!("Adding {} sample recipes...", SAMPLE_RECIPES.len());
    for sample in SAMPLE_RECIPES {
        let recipe = client
            .create(&sample.to_request())
            .await
            .with_context(|| format!("Failed to create \"{}\"", sample.title))?;
        println!("  {} {}", recipe.id, recipe.title);
    }

    let total = client.list().await.context("Failed to list recipes")?.len();
    println!("Done. Server now holds {} recipes.", total);

    Ok(())
}
