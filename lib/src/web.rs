//! # Browser interface
//!
//! Exposes the simulator to JavaScript through `wasm_bindgen`
use crate::error::Result;
use crate::parse::parse_input;
use crate::report::Output;
use crate::simulation::run;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

/// Input format expected from the browser
#[derive(Debug, Serialize, Deserialize)]
pub struct WebInput {
    /// The content of an input file
    pub code: String,
    /// The number of runs to perform
    pub runs: usize,
    /// True if we play first, false if we play second
    pub on_the_play: bool,
    /// The last turn tracked, defaults to the input file setting
    #[serde(default)]
    pub turns: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Runs a simulation given input
/// Assumes that input deserializes into a valid `WebInput`, and returns a serialized `Output`
/// # Example
///
///  ```js
///  const input = {code: "LANDS\nbasic W 17\nSPELLS\nW\n", runs: 10000, on_the_play: true};
///  const output = require('manabase').manabase_run(input);
///  console.log(output);
///  ```
#[wasm_bindgen]
pub fn manabase_run(input: &JsValue) -> JsValue {
    let input: WebInput = match input.into_serde() {
        Err(e) => {
            return JsValue::from_str(&format!("Error deserializing simulation inputs: {:#?}", e));
        }
        Ok(v) => v,
    };
    let result = match run_impl(&input) {
        Err(e) => {
            return JsValue::from_str(&format!("Error running simulation for input: {}", e));
        }
        Ok(v) => v,
    };
    JsValue::from_serde(&result).unwrap_or(JsValue::NULL)
}

/// Runs the simulation described by `input`, with the browser's run count,
/// play order, horizon and seed taking precedence over the input file settings
pub fn run_impl(input: &WebInput) -> Result<Output> {
    let mut parsed = parse_input(&input.code)?;
    parsed.settings.cycles = input.runs;
    parsed.settings.on_the_play = input.on_the_play;
    if let Some(turns) = input.turns {
        parsed.settings.turns = turns;
    }
    if input.seed.is_some() {
        parsed.settings.seed = input.seed;
    }
    let sim = run(&parsed)?;
    Ok(Output::new(&parsed.deck, &parsed.spells, &sim))
}
