//! Daily task listing and deletion

use farm_admin::client::AdminApiClient;
use farm_admin::config::AdminConfig;

use crate::TaskCommands;

pub async fn handle_task_command(cmd: TaskCommands, config: &AdminConfig) -> anyhow::Result<()> {
    let client = AdminApiClient::new(config.api.clone())?;

    match cmd {
        TaskCommands::List => {
            let tasks = client.list_daily_tasks().await?;
            println!("{} daily tasks", tasks.len());
            for task in tasks {
                println!(
                    "  {}  {:<10} {:<6} {:<24} reward {:<8} {}",
                    task.id,
                    task.start_date.get(..10).unwrap_or(&task.start_date),
                    task.task_type.as_deref().unwrap_or("-"),
                    task.task_name,
                    task.task_reward,
                    task.task_link
                );
            }
        }
        TaskCommands::Delete { task_id } => match client.delete_daily_task(&task_id).await {
            Ok(()) => println!("✓ Deleted task {task_id}"),
            Err(e) => {
                eprintln!("✗ Failed to delete task {task_id}: {e}");
                return Err(e.into());
            }
        },
    }
    Ok(())
}
