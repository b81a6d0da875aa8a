use dice::api::{evaluate_request, RollRequest};
use jni::objects::{JClass, JString};
use jni::sys::{jlong, jstring};
use jni::JNIEnv;
use serde_json::json;

fn envelope(result: Result<serde_json::Value, String>) -> String {
    match result {
        Ok(value) => json!({ "ok": true, "result": value }).to_string(),
        Err(e) => json!({ "ok": false, "error": e }).to_string(),
    }
}

fn to_jstring(env: &JNIEnv, payload: String) -> jstring {
    env.new_string(payload)
        .map(|s| s.into_raw())
        .unwrap_or(std::ptr::null_mut())
}

/// Roll one notation string with a fixed seed.
pub fn roll_json(notation: &str, seed: u64) -> String {
    let req = RollRequest {
        dice: vec![notation.to_string()],
        seed: Some(seed),
        ..Default::default()
    };
    envelope(
        evaluate_request(&req)
            .map_err(|e| format!("{e:#}"))
            .and_then(|report| serde_json::to_value(report).map_err(|e| e.to_string())),
    )
}

/// Evaluate a JSON-encoded roll request.
pub fn evaluate_json(input: &str) -> String {
    let req: RollRequest = match serde_json::from_str(input) {
        Ok(r) => r,
        Err(e) => return envelope(Err(format!("invalid_request: {}", e))),
    };
    envelope(
        evaluate_request(&req)
            .map_err(|e| format!("{e:#}"))
            .and_then(|report| serde_json::to_value(report).map_err(|e| e.to_string())),
    )
}

#[no_mangle]
pub extern "system" fn Java_com_dice_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    to_jstring(&env, format!("dice-ffi {}", env!("CARGO_PKG_VERSION")))
}

#[no_mangle]
pub extern "system" fn Java_com_dice_Ffi_rollJson<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    notation: JString<'local>,
    seed: jlong,
) -> jstring {
    let payload = match env.get_string(&notation) {
        Ok(s) => roll_json(&String::from(s), seed as u64),
        Err(e) => envelope(Err(e.to_string())),
    };
    to_jstring(&env, payload)
}

#[no_mangle]
pub extern "system" fn Java_com_dice_Ffi_evaluateJson<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    json: JString<'local>,
) -> jstring {
    let payload = match env.get_string(&json) {
        Ok(s) => evaluate_json(&String::from(s)),
        Err(e) => envelope(Err(e.to_string())),
    };
    to_jstring(&env, payload)
}
