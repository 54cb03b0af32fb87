//! Builtin recipe catalog.
//!
//! These recipes are available to every user, are never persisted to the
//! sync layer, and are re-prepended on every wholesale recipe replacement so
//! a remote snapshot can neither duplicate nor remove them.

use crate::models::{Nutrition, Recipe, RecipeIngredient};

fn recipe_ingredient(name: &str, quantity: f64, unit: &str) -> RecipeIngredient {
    RecipeIngredient {
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
    }
}

/// The fixed seed set, in catalog order. Ids are stable well-known strings.
pub fn builtin_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "default-1".to_string(),
            name: "Grilled Chicken with Broccoli".to_string(),
            ingredients: vec![
                recipe_ingredient("Chicken Breast", 500.0, "g"),
                recipe_ingredient("Broccoli", 250.0, "g"),
                recipe_ingredient("Olive Oil", 2.0, "tbsp"),
            ],
            instructions: vec![
                "Season chicken breast with salt and pepper.".to_string(),
                "Heat olive oil in a pan over medium-high heat.".to_string(),
                "Cook chicken for 6-7 minutes per side until golden.".to_string(),
                "Steam broccoli for 5 minutes until tender.".to_string(),
                "Serve chicken with steamed broccoli.".to_string(),
            ],
            prep_time: 10,
            cook_time: 20,
            servings: 2,
            nutrition: Nutrition {
                calories: 320.0,
                protein: 35.0,
                carbs: 8.0,
                fat: 15.0,
                fiber: 4.0,
            },
            tags: vec![
                "High Protein".to_string(),
                "Low Carb".to_string(),
                "Healthy".to_string(),
            ],
            image: Some(
                "https://images.pexels.com/photos/2338407/pexels-photo-2338407.jpeg".to_string(),
            ),
            is_user_created: false,
        },
        Recipe {
            id: "default-2".to_string(),
            name: "Salmon Rice Bowl".to_string(),
            ingredients: vec![
                recipe_ingredient("Salmon Fillet", 400.0, "g"),
                recipe_ingredient("Rice", 200.0, "g"),
                recipe_ingredient("Bell Peppers", 1.0, "piece"),
            ],
            instructions: vec![
                "Cook rice according to package instructions.".to_string(),
                "Season salmon with herbs and spices.".to_string(),
                "Pan-sear salmon for 4-5 minutes per side.".to_string(),
                "Sauté bell peppers until tender.".to_string(),
                "Assemble bowl with rice, salmon, and peppers.".to_string(),
            ],
            prep_time: 15,
            cook_time: 25,
            servings: 2,
            nutrition: Nutrition {
                calories: 450.0,
                protein: 30.0,
                carbs: 45.0,
                fat: 18.0,
                fiber: 3.0,
            },
            tags: vec![
                "Omega-3".to_string(),
                "Balanced".to_string(),
                "Heart Healthy".to_string(),
            ],
            image: Some(
                "https://images.pexels.com/photos/725997/pexels-photo-725997.jpeg".to_string(),
            ),
            is_user_created: false,
        },
        Recipe {
            id: "default-3".to_string(),
            name: "Beef and Vegetable Stir Fry".to_string(),
            ingredients: vec![
                recipe_ingredient("Ground Beef", 400.0, "g"),
                recipe_ingredient("Bell Peppers", 2.0, "piece"),
                recipe_ingredient("Frozen Peas", 200.0, "g"),
                recipe_ingredient("Rice", 150.0, "g"),
            ],
            instructions: vec![
                "Cook rice according to package instructions.".to_string(),
                "Brown ground beef in a large pan.".to_string(),
                "Add sliced bell peppers and cook for 5 minutes.".to_string(),
                "Add frozen peas and cook for 3 minutes.".to_string(),
                "Season with soy sauce and serve over rice.".to_string(),
            ],
            prep_time: 10,
            cook_time: 20,
            servings: 3,
            nutrition: Nutrition {
                calories: 380.0,
                protein: 25.0,
                carbs: 35.0,
                fat: 16.0,
                fiber: 5.0,
            },
            tags: vec![
                "Quick".to_string(),
                "One Pan".to_string(),
                "Family Friendly".to_string(),
            ],
            image: Some(
                "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg".to_string(),
            ),
            is_user_created: false,
        },
    ]
}
