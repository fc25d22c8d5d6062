mod default;
mod profile;

use sigauth_core::{Context, StaticEnv};
use sigauth_file_read_std::StdFileRead;
use std::collections::HashMap;
use std::path::Path;

pub fn create_test_context(envs: &[(&str, &str)], home_dir: Option<&Path>) -> Context {
    let _ = env_logger::builder().is_test(true).try_init();

    Context::new().with_file_read(StdFileRead).with_env(StaticEnv {
        home_dir: home_dir.map(Path::to_path_buf),
        envs: envs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    })
}
