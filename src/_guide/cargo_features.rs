/*!

# Cargo Features

None of this crate's features are enabled by default.

* **`log`**: Enable logging with [the `log` crate](https://docs.rs/log).
  Generators log variant counts and dropped variants at `debug` level, and
  combination sizes at `trace` level. Installing a logger, for example
  `env_logger`, is up to the application.

 */
