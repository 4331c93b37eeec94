use std::path::PathBuf;

use anyhow::Result;
use fjs_parser::load_fjs;
use log::trace;

pub fn validate(instance_path: PathBuf) -> Result<()> {
    let instance = load_fjs(&instance_path)?;
    trace!("parsed instance: {instance:#?}");

    println!("instance:   {}", instance_path.display());
    println!("jobs:       {}", instance.num_jobs());
    println!("machines:   {}", instance.num_machines);
    println!("operations: {}", instance.total_operations());
    println!("horizon:    {}", instance.horizon());

    Ok(())
}
