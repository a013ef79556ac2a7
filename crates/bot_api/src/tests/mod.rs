mod commands_tests;
mod links_tests;
mod support;
