use std::fs::File;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use simplelog::{Config, LevelFilter, WriteLogger};

use fieldcheck::prelude::*;
use fieldcheck::{FieldOverrides, RawOptions};

/// A signup form validated as a user types: email pattern, password
/// confirmation, and a custom rule on the username.
#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("signup.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let form = Arc::new(RwLock::new(
        Form::new("signup")
            .field(Field::input("username").label("Username").required(true))
            .field(
                Field::input("email")
                    .label("Email")
                    .required(true)
                    .data("pattern", "email"),
            )
            .field(Field::input("password").label("Password").required(true))
            .field(
                Field::input("confirm")
                    .label("Password confirmation")
                    .data("equals", "password"),
            ),
    ));

    let options = RawOptions::new().timeout_ms(200).field(
        "username",
        FieldOverrides::new().validator(|_field, value, _required, _form, _options| {
            value
                .contains(char::is_whitespace)
                .then(|| "Usernames cannot contain spaces.".to_string())
        }),
    );

    let mut engine = Engine::new();
    engine
        .activate(Arc::clone(&form), options)
        .expect("signup options are well-formed");

    let activation = engine.activation("signup").expect("just activated");
    activation.observers().subscribe(|field, outcome| match outcome {
        Outcome::Valid { .. } => println!("  {} ✓", field.human_name()),
        Outcome::Invalid(failure) => println!("  {} ✗ {}", field.human_name(), failure.message),
    });

    // Simulate a user typing into the form. Each keystroke debounces; only
    // the value at rest gets validated.
    let typing: &[(&str, &str)] = &[
        ("username", "al"),
        ("username", "alice"),
        ("email", "alice@"),
        ("email", "alice@example.com"),
        ("password", "hunter2"),
        ("confirm", "hunter"),
        ("confirm", "hunter2"),
    ];

    for (name, value) in typing {
        if let Ok(mut guard) = form.write() {
            guard.set_value(name, *value);
        }
        engine.on_interaction("signup", FieldEvent::input(*name));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // Let the last timers fire, then blur the empty username-less fields.
    tokio::time::sleep(Duration::from_millis(300)).await;
    engine.on_interaction("signup", FieldEvent::blur("username"));
    tokio::time::sleep(Duration::from_millis(300)).await;

    Ok(())
}
