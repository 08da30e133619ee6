use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use lingo_engine::{
    resolve_attack, resolve_defense, resolve_request, BalanceConfig, CombatActionInput,
    CombatActionResult, CombatError, CombatRequest,
};
use serde_json::json;

const VERSION: &str = concat!("lingo-ffi ", env!("CARGO_PKG_VERSION"));

fn ok(value: impl serde::Serialize) -> String {
    match serde_json::to_value(value) {
        Ok(result) => json!({ "ok": true, "result": result }).to_string(),
        Err(e) => err(e),
    }
}

fn err(e: impl std::fmt::Display) -> String {
    json!({ "ok": false, "error": e.to_string() }).to_string()
}

/// A null return tells the JVM side a Java exception is already pending.
fn to_jstring(env: &JNIEnv, payload: String) -> jstring {
    match env.new_string(payload) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn with_json_arg(mut env: JNIEnv, json: JString, f: impl FnOnce(&str) -> String) -> jstring {
    let payload = match env.get_string(&json) {
        Ok(s) => {
            let input: String = s.into();
            f(&input)
        }
        Err(e) => err(e),
    };
    to_jstring(&env, payload)
}

fn parse_request(input: &str) -> Result<CombatRequest, String> {
    serde_json::from_str(input).map_err(|e| format!("invalid_request: {}", e))
}

fn respond(result: Result<CombatActionResult, CombatError>) -> String {
    match result {
        Ok(res) => ok(res),
        Err(e) => err(e),
    }
}

/* ---------------- internal entry points (no JVM required) ---------------- */

pub fn resolve_json_internal(input: &str) -> String {
    match parse_request(input) {
        Ok(req) => respond(resolve_request(req)),
        Err(e) => err(e),
    }
}

pub fn resolve_attack_json_internal(input: &str) -> String {
    match parse_request(input) {
        Ok(req) => respond(CombatActionInput::try_from(req).and_then(resolve_attack)),
        Err(e) => err(e),
    }
}

pub fn resolve_defense_json_internal(input: &str) -> String {
    match parse_request(input) {
        Ok(req) => respond(CombatActionInput::try_from(req).and_then(resolve_defense)),
        Err(e) => err(e),
    }
}

pub fn balance_json_internal(preset: &str) -> String {
    match BalanceConfig::builtin(preset) {
        Ok(cfg) => ok(cfg),
        Err(e) => err(e),
    }
}

/* ---------------- JNI exports ---------------- */

#[no_mangle]
pub extern "system" fn Java_com_lingo_battle_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    to_jstring(&env, VERSION.to_string())
}

#[no_mangle]
pub extern "system" fn Java_com_lingo_battle_Ffi_resolveJson(
    env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    with_json_arg(env, json, resolve_json_internal)
}

#[no_mangle]
pub extern "system" fn Java_com_lingo_battle_Ffi_resolveAttackJson(
    env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    with_json_arg(env, json, resolve_attack_json_internal)
}

#[no_mangle]
pub extern "system" fn Java_com_lingo_battle_Ffi_resolveDefenseJson(
    env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    with_json_arg(env, json, resolve_defense_json_internal)
}

#[no_mangle]
pub extern "system" fn Java_com_lingo_battle_Ffi_balanceJson(
    env: JNIEnv,
    _class: JClass,
    preset: JString,
) -> jstring {
    with_json_arg(env, preset, balance_json_internal)
}
