use anyhow::Result;
use cueshot_core::TargetGroup;
use cueshot_interaction::prompt::build_instructions;
use cueshot_interaction::schema::response_schema;

pub fn print(prompt: Option<TargetGroup>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&response_schema())?);

    if let Some(target) = prompt {
        println!();
        println!("{}", build_instructions(target));
    }

    Ok(())
}
