#![no_main]

use libfuzzer_sys::fuzz_target;
use mochi_input::{Action, Grammar, Parameter, Terminal};

fn grammar() -> Grammar {
    let digits = Parameter::from_chars("Digits", "0123456789").unwrap();
    let alnum = Parameter::new("AlphaNum", ('a'..='z').chain('A'..='Z').chain('0'..='9')).unwrap();

    let mut grammar = Grammar::new();
    grammar.register(&['a'.into()], Action::new().on0(|| {}).unwrap().on1(|_| {}).unwrap()).unwrap();
    grammar.register(&[digits.into()], Terminal::Continue).unwrap();
    grammar
        .register(
            &['t'.into(), alnum.clone().into(), 'b'.into()],
            Action::new().on1(|_| {}).unwrap().on2(|_, _| {}).unwrap(),
        )
        .unwrap();
    grammar.register(&['T'.into(), alnum.into()], Terminal::Continue).unwrap();
    // Arity 0 deliberately unbound so dispatch errors are exercised
    grammar
        .register(
            &['T'.into(), ';'.into(), 'b'.into()],
            Action::new().on1(|_| {}).unwrap().on2(|_, _| {}).unwrap(),
        )
        .unwrap();
    grammar
}

fuzz_target!(|data: &[u8]| {
    let grammar = grammar();
    let mut session = grammar.begin();

    // Feed the data to the session - it should never panic
    for c in String::from_utf8_lossy(data).chars() {
        match session.push(c) {
            Ok(true) => {}
            // Failed matches and dispatch errors both leave the session idle
            Ok(false) | Err(_) => assert!(session.is_idle()),
        }
        // Captures are bounded by the deepest rule
        assert!(session.captures().len() <= 2);
    }
});
