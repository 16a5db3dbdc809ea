/// End-to-end tests of the garden through its public API
mod growth_scenario;
mod habit_streaks;
mod persistence;
mod history_queries;
mod mcp_session;
