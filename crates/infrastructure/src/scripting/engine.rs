//! Embedded JavaScript engine.
//!
//! Every evaluation gets a fresh boa context. The receiver object crosses the
//! boundary as JSON text in the [`wire`](super::wire) format; the prelude
//! builds `this` from it and reports the outcome back the same way.

use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use boa_engine::{Context, Source, js_string};
use prestige_application::{ScriptError, SyntaxIssue};
use prestige_domain::{ExecutionContext, MultipartFile, NoticeKind, Value};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value as Json};

use super::context_api::install_natives;
use super::names::is_binding_name;
use super::wire;

/// Loop iterations allowed per evaluation before the script is stopped.
const LOOP_ITERATION_LIMIT: u64 = 1_000_000;

/// Lines of wrapper code before the first line of a script body.
const SCRIPT_BODY_OFFSET: usize = 1;

/// Lines of wrapper code before the first line of an expression.
const EXPRESSION_BODY_OFFSET: usize = 2;

static POSITION: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s*at line (\d+), col (\d+)").ok());

const PRELUDE: &str = r#"
class HostError extends Error {
  constructor(message) {
    super(message);
    this.name = "HostError";
  }
}

var __sheetThis;
var __sheetNotices = [];
var __sheetOutcome;

const __sheetWire = {
  encode(value) {
    return JSON.stringify(value, (key, v) => {
      if (v === undefined) return { "@undefined": true };
      if (typeof v === "number" && !Number.isFinite(v)) return { "@number": String(v) };
      if (v instanceof Map) return { "@multipart": Array.from(v.entries()) };
      if (typeof v === "function" || typeof v === "symbol") return undefined;
      return v;
    });
  },
  decode(text) {
    return JSON.parse(text, (key, v) => {
      if (v !== null && typeof v === "object" && !Array.isArray(v) && Object.keys(v).length === 1) {
        if (v["@undefined"] === true) return undefined;
        if (typeof v["@number"] === "string") return Number(v["@number"]);
        if (Array.isArray(v["@multipart"])) return new Map(v["@multipart"]);
      }
      return v;
    });
  },
};

const __sheetIsFile = (value) =>
  value !== null &&
  typeof value === "object" &&
  typeof value.body === "string" &&
  typeof value.name === "string" &&
  typeof value.type === "string";

function __sheetStart(state) {
  const files = state.files;
  const notices = [];
  __sheetNotices = notices;
  __sheetOutcome = undefined;
  __sheetThis = {
    data: state.data,
    basicAuth: (user, password) => __sheetBasicAuth(user, password),
    authHeader: (user, password) => "Authorization: " + __sheetBasicAuth(user, password),
    multipart(fields) {
      if (fields === null || typeof fields !== "object") {
        const type = fields === null ? "null" : typeof fields;
        throw new HostError("multipart() expects an object, got " + type);
      }
      return new Map(
        Object.entries(fields).map(([name, value]) => [name, __sheetIsFile(value) ? value : String(value)]),
      );
    },
    file(name) {
      if (!Object.hasOwn(files, name)) {
        throw new HostError("File not available: " + name);
      }
      return { ...files[name] };
    },
    toast(...args) {
      const [type, message] = args.length >= 2 ? args : ["success", args.length === 1 ? args[0] : ""];
      notices.push({ type: String(type), message: String(message) });
    },
  };
}

function __sheetDescribe(error) {
  if (error instanceof Error) {
    return { name: String(error.name), message: String(error.message) };
  }
  return { name: null, message: String(error) };
}

function __sheetFinish(ok, result) {
  const outcome = ok ? { ok, value: result } : { ok, error: __sheetDescribe(result) };
  outcome.notices = __sheetNotices;
  try {
    outcome.data = __sheetThis.data;
    __sheetOutcome = __sheetWire.encode(outcome);
  } catch (error) {
    __sheetOutcome = __sheetWire.encode({
      ok: false,
      error: __sheetDescribe(error),
      data: null,
      notices: __sheetNotices,
    });
  }
}
"#;

/// What the prelude reports once the script promise settles.
#[derive(Debug, Deserialize)]
struct Outcome {
    ok: bool,
    #[serde(default)]
    value: Json,
    #[serde(default)]
    error: Option<Failure>,
    #[serde(default)]
    data: Json,
    #[serde(default)]
    notices: Vec<RawNotice>,
}

#[derive(Debug, Deserialize)]
struct Failure {
    name: Option<String>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RawNotice {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// A boa context with the sheet prelude loaded.
struct Engine {
    context: Context,
}

impl Engine {
    fn new() -> Result<Self, ScriptError> {
        let mut context = Context::default();
        context
            .runtime_limits_mut()
            .set_loop_iteration_limit(LOOP_ITERATION_LIMIT);
        install_natives(&mut context).map_err(|err| ScriptError::Host(err.to_string()))?;
        context
            .eval(Source::from_bytes(PRELUDE))
            .map_err(|err| ScriptError::Host(err.to_string()))?;
        Ok(Self { context })
    }

    /// Parses `function` without calling it.
    fn compile(&mut self, function: &str, body: &str, offset: usize) -> Result<(), SyntaxIssue> {
        self.context
            .eval(Source::from_bytes(function))
            .map(drop)
            .map_err(|err| syntax_issue(&err.to_string(), body, offset))
    }

    /// Calls `function` with `this` built from `context` and waits for it to settle.
    fn run(&mut self, function: &str, args: &str, context: &mut ExecutionContext) -> Result<Value, ScriptError> {
        let state = Json::Object(Map::from_iter([
            ("data".to_string(), wire::encode_object(&context.data)),
            ("files".to_string(), staged_files(context)),
        ]));
        let state = Json::String(state.to_string());
        let code = format!(
            "__sheetStart(__sheetWire.decode({state}));\n\
             {function}.call(__sheetThis{args}).then(\n  \
             (value) => __sheetFinish(true, value),\n  \
             (error) => __sheetFinish(false, error));"
        );

        self.context
            .eval(Source::from_bytes(&code))
            .map_err(|err| ScriptError::Thrown(err.to_string()))?;
        self.context.run_jobs();

        let outcome = self
            .context
            .global_object()
            .get(js_string!("__sheetOutcome"), &mut self.context)
            .map_err(|err| ScriptError::Thrown(err.to_string()))?;
        let Some(outcome) = outcome.as_string().map(|text| text.to_std_string_escaped()) else {
            return Err(ScriptError::Thrown("Script did not finish".to_string()));
        };
        let outcome: Outcome =
            serde_json::from_str(&outcome).map_err(|err| ScriptError::Host(format!("Unreadable script result: {err}")))?;

        apply(outcome, context)
    }
}

fn apply(outcome: Outcome, context: &mut ExecutionContext) -> Result<Value, ScriptError> {
    if let Value::Object(data) = wire::decode(outcome.data) {
        context.data = data;
    }
    for notice in outcome.notices {
        let kind = NoticeKind::from_name(&notice.kind).unwrap_or(NoticeKind::Success);
        context.notify(kind, notice.message);
    }

    if outcome.ok {
        return Ok(wire::decode(outcome.value));
    }
    Err(outcome.error.map_or_else(
        || ScriptError::Thrown("Script failed".to_string()),
        script_error,
    ))
}

fn staged_files(context: &ExecutionContext) -> Json {
    Json::Object(
        context
            .files
            .iter()
            .map(|staged| {
                let file = MultipartFile {
                    body: STANDARD.encode(&staged.bytes),
                    name: staged.name.clone(),
                    mime_type: staged.mime_type.clone(),
                    size: staged.bytes.len(),
                };
                (staged.name.clone(), wire::encode_file(&file))
            })
            .collect(),
    )
}

fn script_error(failure: Failure) -> ScriptError {
    let Failure { name, message } = failure;
    match name.as_deref() {
        None => ScriptError::Thrown(message),
        Some("HostError") => ScriptError::Host(message),
        Some("TypeError") => ScriptError::Type(message),
        Some("SyntaxError") => ScriptError::Syntax {
            message,
            line: 0,
            column: 0,
        },
        Some("ReferenceError") => match message.strip_suffix(" is not defined") {
            Some(name) => ScriptError::Reference(name.to_string()),
            None => ScriptError::Thrown(format!("ReferenceError: {message}")),
        },
        Some(name) if message.is_empty() => ScriptError::Thrown(name.to_string()),
        Some(name) => ScriptError::Thrown(format!("{name}: {message}")),
    }
}

/// Turns a boa syntax error into a position within `body`.
///
/// Positions on wrapper lines are clamped to the end of the body.
fn syntax_issue(error: &str, body: &str, offset: usize) -> SyntaxIssue {
    let message = error.strip_prefix("SyntaxError: ").unwrap_or(error);
    let last_line = body.split('\n').count().saturating_sub(1);
    let end_column = body.rsplit('\n').next().map_or(0, |line| line.chars().count());

    let position = POSITION.as_ref().and_then(|re| re.captures(message)).and_then(|caps| {
        let whole = caps.get(0)?;
        let line: usize = caps.get(1)?.as_str().parse().ok()?;
        let column: usize = caps.get(2)?.as_str().parse().ok()?;
        Some((whole.range(), line, column))
    });

    match position {
        Some((range, line, column)) => {
            let stripped = format!("{}{}", &message[..range.start], &message[range.end..]);
            let line = line.saturating_sub(1 + offset);
            let (line, column) = if line > last_line {
                (last_line, end_column)
            } else {
                (line, column.saturating_sub(1))
            };
            SyntaxIssue {
                message: stripped,
                line,
                column,
            }
        }
        None => SyntaxIssue {
            message: message.to_string(),
            line: last_line,
            column: end_column,
        },
    }
}

fn syntax_error(issue: SyntaxIssue) -> ScriptError {
    ScriptError::Syntax {
        message: issue.message,
        line: issue.line,
        column: issue.column,
    }
}

fn script_function(source: &str) -> String {
    format!("(async function () {{\n{source}\n}})")
}

fn expression_function(expression: &str, params: &[&str]) -> String {
    format!("(async function ({}) {{\nreturn (\n{expression}\n);\n}})", params.join(", "))
}

/// Checks `source` as the body of an async function.
pub(crate) fn check_script(source: &str) -> Result<(), SyntaxIssue> {
    let mut engine = Engine::new().map_err(|err| SyntaxIssue {
        message: err.to_string(),
        line: 0,
        column: 0,
    })?;
    engine.compile(&script_function(source), source, SCRIPT_BODY_OFFSET)
}

/// Runs `source` as the body of an async function bound to `context`.
pub(crate) fn run_script(source: &str, context: &mut ExecutionContext) -> Result<Value, ScriptError> {
    let function = script_function(source);
    let mut engine = Engine::new()?;
    engine
        .compile(&function, source, SCRIPT_BODY_OFFSET)
        .map_err(syntax_error)?;
    engine.run(&function, "", context)
}

/// Evaluates `expression` with the data bag keys bound as parameters.
///
/// Keys that cannot name a parameter stay reachable through `this.data`.
pub(crate) fn run_expression(expression: &str, context: &mut ExecutionContext) -> Result<Value, ScriptError> {
    let params: Vec<&str> = context.data.keys().map(String::as_str).filter(|key| is_binding_name(key)).collect();
    let args: String = params
        .iter()
        .map(|key| format!(", __sheetThis.data[{}]", Json::String((*key).to_string())))
        .collect();
    let function = expression_function(expression, &params);

    let mut engine = Engine::new()?;
    engine
        .compile(&function, expression, EXPRESSION_BODY_OFFSET)
        .map_err(syntax_error)?;
    engine.run(&function, &args, context)
}
