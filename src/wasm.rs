// src/wasm.rs

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use js_sys::Function;
use serde::Deserialize;
use web_sys::console;
use crate::{
    Datapack,
    Scoreboard,
    Criteria,
    Condition,
    Score,
    Operation,
    Comparison,
    datapack::{FunctionOptions, OnConflict, Repeat},
    print_utils::{format_datapack, format_json_datapack},
};

#[wasm_bindgen(start)]
pub fn start() {
    console::log_1(&"Initializing mvcstone".into());
}

// Function options as written in JS build scripts:
// { onConflict: "append", runEachTick: true } or { runEach: 20 }
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsFunctionOptions {
    on_conflict: Option<OnConflict>,
    run_each_tick: Option<bool>,
    run_each: Option<u32>,
}

impl From<JsFunctionOptions> for FunctionOptions {
    fn from(options: JsFunctionOptions) -> Self {
        let repeat = match (options.run_each_tick, options.run_each) {
            (Some(true), _) => Repeat::EachTick,
            (_, Some(ticks)) => Repeat::Every(ticks),
            _ => Repeat::Once,
        };
        FunctionOptions {
            on_conflict: options.on_conflict.unwrap_or(OnConflict::Append),
            repeat,
        }
    }
}

fn parse_options(options: JsValue) -> Result<FunctionOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(FunctionOptions::default());
    }
    let options: JsFunctionOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid function options: {}", e)))?;
    Ok(options.into())
}

fn parse_score(value: JsValue) -> Result<Score, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Expected a score {{ target, objective }}: {}", e)))
}

fn parse_operand(value: JsValue) -> Result<serde_json::Value, JsValue> {
    if value.is_undefined() {
        return Ok(serde_json::Value::Null);
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Unreadable operand: {}", e)))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

// Shared so that JS callbacks running inside a function block can reach the
// same datapack again.
#[wasm_bindgen]
pub struct DatapackWrapper(Rc<RefCell<Datapack>>);

#[wasm_bindgen]
pub struct ScoreboardWrapper(Scoreboard);

#[wasm_bindgen]
pub struct ConditionWrapper(Condition);

impl DatapackWrapper {
    fn run_block(&self, path: &str, options: FunctionOptions, body: &Function) -> Result<(), JsValue> {
        self.0.borrow_mut().begin_function(path, options);
        let result = body.call0(&JsValue::NULL);
        self.0.borrow_mut().end_function();
        result.map(|_| ())
    }
}

#[wasm_bindgen]
impl DatapackWrapper {
    #[wasm_bindgen(constructor)]
    pub fn new(namespace: &str) -> Self {
        console::log_1(&format!("DatapackWrapper created for {}", namespace).into());
        DatapackWrapper(Rc::new(RefCell::new(Datapack::new(namespace))))
    }

    #[wasm_bindgen(js_name = mcFunction)]
    pub fn mc_function(&self, path: &str, body: &Function, options: JsValue) -> Result<(), JsValue> {
        let options = parse_options(options)?;
        self.run_block(path, options, body)
    }

    #[wasm_bindgen(js_name = isMCFunction)]
    pub fn is_mc_function(&self, path: &str, body: &Function) -> Result<(), JsValue> {
        self.run_block(path, FunctionOptions::append(), body)
    }

    #[wasm_bindgen(js_name = isLoopTick)]
    pub fn is_loop_tick(&self, path: &str, body: &Function) -> Result<(), JsValue> {
        self.run_block(path, FunctionOptions::each_tick(), body)
    }

    #[wasm_bindgen(js_name = isLoopBy)]
    pub fn is_loop_by(&self, path: &str, ticks: u32, body: &Function) -> Result<(), JsValue> {
        self.run_block(path, FunctionOptions::every(ticks), body)
    }

    pub fn emit(&self, command: &str) {
        self.0.borrow_mut().emit(command);
    }

    #[wasm_bindgen(js_name = executeIf)]
    pub fn execute_if(&self, condition: &ConditionWrapper, command: &str) {
        self.0.borrow_mut().execute_if(&condition.0, command);
    }

    pub fn tellraw(&self, target: &str, components: JsValue) -> Result<(), JsValue> {
        let components: serde_json::Value = serde_wasm_bindgen::from_value(components)
            .map_err(|e| JsValue::from_str(&format!("Invalid text components: {}", e)))?;
        self.0
            .borrow_mut()
            .tellraw(target, &components)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = functionCommands)]
    pub fn function_commands(&self, path: &str) -> Vec<String> {
        self.0.borrow().function(path).map(|function| function.render()).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = loadCommands)]
    pub fn load_commands(&self) -> Vec<String> {
        self.0.borrow().load_commands().to_vec()
    }

    #[wasm_bindgen(js_name = tickFunctions)]
    pub fn tick_functions(&self) -> Vec<String> {
        self.0.borrow().tick_functions().to_vec()
    }

    pub fn json(&self) -> String {
        format_json_datapack(&self.0.borrow())
    }

    #[wasm_bindgen(js_name = printDatapack)]
    pub fn print_datapack(&self) -> String {
        format_datapack(&self.0.borrow())
    }
}

#[wasm_bindgen]
impl ScoreboardWrapper {
    #[wasm_bindgen(constructor)]
    pub fn new(datapack: &DatapackWrapper, name: &str, criteria: &str) -> Self {
        let criteria: Criteria = criteria.parse().unwrap_or_else(|never| match never {});
        ScoreboardWrapper(Scoreboard::new(&mut datapack.0.borrow_mut(), name, criteria))
    }

    #[wasm_bindgen(js_name = getName)]
    pub fn get_name(&self) -> String {
        self.0.name().to_string()
    }

    #[wasm_bindgen(js_name = getCriteria)]
    pub fn get_criteria(&self) -> String {
        self.0.criteria().to_string()
    }

    #[wasm_bindgen(js_name = getSelector)]
    pub fn get_selector(&self, target: &str) -> Result<JsValue, JsValue> {
        to_js(&self.0.selector(target))
    }

    #[wasm_bindgen(js_name = setAbsolute)]
    pub fn set_absolute(&mut self, datapack: &DatapackWrapper, value: i32) -> Result<JsValue, JsValue> {
        let literal = self.0.set_absolute(&mut datapack.0.borrow_mut(), value);
        to_js(&literal)
    }

    pub fn set(&self, datapack: &DatapackWrapper, target: &str, value: i32) {
        self.0.set(&mut datapack.0.borrow_mut(), target, value);
    }

    pub fn add(&self, datapack: &DatapackWrapper, target: &str, value: i32) {
        self.0.add(&mut datapack.0.borrow_mut(), target, value);
    }

    pub fn remove(&self, datapack: &DatapackWrapper, target: &str, value: i32) {
        self.0.remove(&mut datapack.0.borrow_mut(), target, value);
    }

    #[wasm_bindgen(js_name = setFrom)]
    pub fn set_from(&self, datapack: &DatapackWrapper, target: &str, other: JsValue) -> Result<(), JsValue> {
        let other = parse_score(other)?;
        self.0.set_from(&mut datapack.0.borrow_mut(), target, &other);
        Ok(())
    }

    #[wasm_bindgen(js_name = addFrom)]
    pub fn add_from(&self, datapack: &DatapackWrapper, target: &str, other: JsValue) -> Result<(), JsValue> {
        let other = parse_score(other)?;
        self.0.add_from(&mut datapack.0.borrow_mut(), target, &other);
        Ok(())
    }

    pub fn calculate(
        &mut self,
        datapack: &DatapackWrapper,
        target: &str,
        operator: &str,
        operand: JsValue,
    ) -> Result<(), JsValue> {
        let operation = operator.parse::<Operation>().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let operand = parse_operand(operand)?;
        self.0
            .calculate(&mut datapack.0.borrow_mut(), target, operation, operand)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = ifScore)]
    pub fn if_score(
        &mut self,
        datapack: &DatapackWrapper,
        target: &str,
        condition: &str,
        operand: JsValue,
    ) -> Result<ConditionWrapper, JsValue> {
        let comparison = condition.parse::<Comparison>().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let operand = parse_operand(operand)?;
        self.0
            .compare(&mut datapack.0.borrow_mut(), target, comparison, operand)
            .map(ConditionWrapper)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = getTellraw)]
    pub fn get_tellraw(&self, target: &str) -> Result<JsValue, JsValue> {
        to_js(&self.0.tellraw_score(target))
    }

    #[wasm_bindgen(js_name = getTellrawScore)]
    pub fn get_tellraw_score(&self, target: &str) -> Result<JsValue, JsValue> {
        self.get_tellraw(target)
    }
}

#[wasm_bindgen]
impl ConditionWrapper {
    pub fn keyword(&self) -> String {
        self.0.keyword().to_string()
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_js_string(&self) -> String {
        self.0.to_string()
    }
}
