use std::io::Write;

use tracing::debug;

use crate::interpreter::{
    evaluator::core::EvalResult, runtime::Runtime, value::core::Value,
};

/// Allocates an empty entity.
///
/// Registered as `entity new()`.
///
/// # Example
/// ```
/// use entity::interpreter::{function::native::new_entity, runtime::Runtime, value::core::Value};
///
/// let mut runtime = Runtime::default();
/// let value = new_entity(&mut runtime, 1).unwrap();
///
/// assert!(matches!(value, Value::Entity(_)));
/// assert_eq!(runtime.entities.live(), 1);
/// ```
#[allow(clippy::unnecessary_wraps)]
pub fn new_entity(runtime: &mut Runtime, _line: usize) -> EvalResult<Value> {
    let entity = runtime.entities.allocate();
    debug!(live = runtime.entities.live(), "new entity");
    Ok(Value::Entity(entity))
}

/// Destroys the entity passed as `e`, together with all its members.
///
/// Registered as `void del(entity e)`. Any other holder of the same handle
/// must not use it afterwards.
pub fn del_entity(runtime: &mut Runtime, line: usize) -> EvalResult<Value> {
    let e = runtime.symbols.intern("e");
    let entity = runtime.lookup(e, line)?.as_entity(line)?;

    runtime.entity_mut(entity, line)?;
    runtime.entities.delete(entity);
    debug!(live = runtime.entities.live(), "deleted entity");

    Ok(Value::Void)
}

/// Writes the string passed as `s` to standard output, without a newline.
///
/// Registered as `void print(string s)` by the command-line host.
pub fn print(runtime: &mut Runtime, line: usize) -> EvalResult<Value> {
    let s = runtime.symbols.intern("s");
    let Value::String(text) = *runtime.lookup(s, line)? else {
        return Ok(Value::Void);
    };

    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{}", runtime.name(text));
    let _ = stdout.flush();

    Ok(Value::Void)
}
