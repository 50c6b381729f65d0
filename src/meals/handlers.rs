use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::dto::{Meal, MealsQuery, NewMeal};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/meals", post(create_meal).get(list_meals))
}

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    Json(body): Json<NewMeal>,
) -> Result<(StatusCode, Json<Meal>), (StatusCode, String)> {
    if body.description.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "description is required".into()));
    }
    let meal = state.meals.add(body).await;
    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    Query(q): Query<MealsQuery>,
) -> Json<Vec<Meal>> {
    let meals = match q.day.as_deref() {
        Some(day) => state.meals.by_day(day).await,
        None => state.meals.all().await,
    };
    Json(meals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::dto::MealType;

    fn new_meal(day: &str) -> NewMeal {
        NewMeal {
            meal_type: MealType::Dinner,
            description: "moi moi with custard".into(),
            day: day.into(),
            nutritional_info: None,
        }
    }

    #[tokio::test]
    async fn create_then_list_by_day_roundtrip() {
        let state = AppState::fake();
        let (status, Json(created)) = create_meal(State(state.clone()), Json(new_meal("Friday")))
            .await
            .expect("create succeeds");
        assert_eq!(status, StatusCode::CREATED);

        let Json(listed) = list_meals(
            State(state),
            Query(MealsQuery {
                day: Some("Friday".into()),
            }),
        )
        .await;
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn create_rejects_blank_descriptions() {
        let state = AppState::fake();
        let mut body = new_meal("Monday");
        body.description = "   ".into();
        let err = create_meal(State(state), Json(body)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_without_day_returns_everything() {
        let state = AppState::fake();
        state.meals.add(new_meal("Monday")).await;
        state.meals.add(new_meal("Tuesday")).await;
        let Json(listed) = list_meals(State(state), Query(MealsQuery { day: None })).await;
        assert_eq!(listed.len(), 2);
    }
}
