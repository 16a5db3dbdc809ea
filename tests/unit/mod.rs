/// Crate-level unit tests of the pure garden rules
mod growth_rules;
mod streak_rules;
mod documents;
