//! Environment source: `CASEGEN_<SECTION>__<KEY>`, e.g. `CASEGEN_PROVIDER__MODEL`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("CASEGEN")
            .prefix_separator("_")
            .separator("__"),
    )
}
