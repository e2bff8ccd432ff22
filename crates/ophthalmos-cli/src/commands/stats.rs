use super::AppContext;
use anyhow::Result;
use colored::Colorize;

pub async fn show(ctx: &AppContext) -> Result<()> {
    ctx.require_account().await;
    let stats = ctx.usecase.performance_stats().await;

    println!("{}", "=== Performance ===".bright_magenta().bold());
    println!("Tests taken     {}", stats.total_tests);
    println!("Average score   {:.2}", stats.average_score);
    println!("Average time    {:.2}s", stats.average_time);

    let improvement = format!("{:+.2}%", stats.improvement);
    let improvement = if stats.improvement > 0.0 {
        improvement.green()
    } else if stats.improvement < 0.0 {
        improvement.red()
    } else {
        improvement.normal()
    };
    println!("Improvement     {}", improvement);
    Ok(())
}
