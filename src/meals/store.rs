use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::dto::{Meal, NewMeal};

/// In-memory, append-only meal log. Session-lifetime only, nothing is
/// persisted. Owned by the composition root and injected through `AppState`
/// so tests can stand up their own.
#[derive(Default)]
pub struct MealLog {
    meals: RwLock<Vec<Meal>>,
}

impl MealLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a meal, assigning a fresh UUID. Insertion order is the only
    /// ordering the log knows about.
    pub async fn add(&self, new: NewMeal) -> Meal {
        let meal = Meal {
            id: Uuid::new_v4(),
            meal_type: new.meal_type,
            description: new.description,
            day: new.day,
            nutritional_info: new.nutritional_info,
            created_at: OffsetDateTime::now_utc(),
        };
        self.meals.write().await.push(meal.clone());
        meal
    }

    /// Meals whose `day` equals the argument exactly, in insertion order.
    pub async fn by_day(&self, day: &str) -> Vec<Meal> {
        self.meals
            .read()
            .await
            .iter()
            .filter(|m| m.day == day)
            .cloned()
            .collect()
    }

    pub async fn all(&self) -> Vec<Meal> {
        self.meals.read().await.clone()
    }
}
