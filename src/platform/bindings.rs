//! JS-facing manager for the game scripts
//!
//! Exposed to JS as `LocalStorageManager`. Game state crosses the boundary
//! as JSON text, so whatever `JSON.stringify` rejects (cycles, BigInt)
//! throws from `setGameState`.

use std::rc::Rc;

use js_sys::{JSON, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use super::DefaultManager;
use crate::settings::Settings;

#[wasm_bindgen(js_name = LocalStorageManager)]
pub struct JsStorageManager {
    inner: Rc<DefaultManager>,
}

impl JsStorageManager {
    pub fn from_manager(inner: Rc<DefaultManager>) -> Self {
        Self { inner }
    }
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsError::new(&e.to_string()).into()
}

/// JS numbers to scores: negatives and NaN become 0
fn to_score(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

#[wasm_bindgen(js_class = LocalStorageManager)]
impl JsStorageManager {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<JsStorageManager, JsValue> {
        let manager = super::open(&Settings::from_location()).map_err(js_error)?;
        Ok(Self::from_manager(Rc::new(manager)))
    }

    #[wasm_bindgen(js_name = getBestScore)]
    pub fn get_best_score(&self) -> f64 {
        self.inner.get_best_score() as f64
    }

    /// Resolves once the server sync (if any) has finished. Never rejects.
    #[wasm_bindgen(js_name = setBestScore)]
    pub fn set_best_score(&self, score: f64) -> Promise {
        let inner = Rc::clone(&self.inner);
        let score = to_score(score);
        future_to_promise(async move {
            inner.set_best_score(score).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Saved game object, or `null`
    #[wasm_bindgen(js_name = getGameState)]
    pub fn get_game_state(&self) -> Result<JsValue, JsValue> {
        let state: Option<serde_json::Value> = self.inner.get_game_state().map_err(js_error)?;
        match state {
            Some(value) => JSON::parse(&value.to_string()),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = setGameState)]
    pub fn set_game_state(&self, state: &JsValue) -> Result<(), JsValue> {
        let json = JSON::stringify(state)?
            .as_string()
            .unwrap_or_else(|| "null".to_string());
        let value: serde_json::Value = serde_json::from_str(&json).map_err(js_error)?;
        self.inner.set_game_state(&value).map_err(js_error)
    }

    #[wasm_bindgen(js_name = clearGameState)]
    pub fn clear_game_state(&self) {
        self.inner.clear_game_state();
    }

    /// Resolves once the server reset (if any) has finished. Never rejects.
    #[wasm_bindgen(js_name = clearStorage)]
    pub fn clear_storage(&self) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            inner.clear_storage().await;
            Ok(JsValue::UNDEFINED)
        })
    }
}
