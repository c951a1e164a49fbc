//! The overload set behind `polykit dispatch`.

use polykit::{
    DispatchEngine, Function, MatchPredicate, RegisterError, RegisterOptions, Registration, Value,
};

/// Builds an engine that describes its arguments, one overload per shape.
pub fn describe_engine() -> Result<DispatchEngine, RegisterError> {
    let mut engine = DispatchEngine::new();
    engine
        .register(Registration::base(
            Function::named("describeString", |args| {
                let text = args[0].as_str().unwrap_or_default();
                Ok(Value::from(format!("string of length {}", text.chars().count())))
            }),
            ["string", "string"],
        ))?
        .register(Registration::matched(
            Function::named("describeInteger", |args| {
                Ok(Value::from(format!("integer {}", args[0])))
            }),
            MatchPredicate::new(|args, _| {
                args[0].as_f64().is_some_and(|n| n.is_finite() && n.fract() == 0.0)
            }),
            ["number", "string"],
        ))?
        .register(Registration::base(
            Function::named("describeNumber", |args| Ok(Value::from(format!("number {}", args[0])))),
            ["number", "string"],
        ))?
        .register(Registration::base(
            Function::named("sum", |args| {
                let sum: f64 = args.iter().filter_map(Value::as_f64).sum();
                Ok(Value::from(sum))
            }),
            ["number", "number", "number"],
        ))?
        .register(Registration::base(
            Function::named("countStrings", |args| Ok(Value::from(format!("{} strings", args.len())))),
            ["...string"],
        ))?
        .register(
            RegisterOptions::new(Function::named("describeNumbers", |args| {
                let len = args[0].as_array().map_or(0, <[Value]>::len);
                Ok(Value::from(format!("array of {len} numbers")))
            }))
            .types(["number[]"])
            .return_type("string"),
        )?
        .register(
            RegisterOptions::new(Function::named("describeObject", |args| {
                let keys: Vec<&str> = args[0]
                    .as_object()
                    .map(|object| object.keys().map(String::as_str).collect())
                    .unwrap_or_default();
                Ok(Value::from(format!("object with keys {}", keys.join(", "))))
            }))
            .types(["object"])
            .return_type("string"),
        )?
        .register(
            RegisterOptions::new(Function::named("passPromise", |args| Ok(args[0].clone())))
                .types(["promise"])
                .return_type("promise"),
        )?;
    Ok(engine)
}
