use super::{AppContext, Prompt, print_profile, swatch};
use anyhow::Result;
use colored::Colorize;
use ophthalmos_core::cone::{ConeTest, TestQuestion};

enum Input {
    Choose(usize),
    Back,
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    match line {
        "1" | "a" | "A" => Input::Choose(0),
        "2" | "b" | "B" => Input::Choose(1),
        "<" | "back" => Input::Back,
        "q" | "quit" => Input::Quit,
        _ => Input::Unknown,
    }
}

fn show_question(test: &ConeTest, question: &TestQuestion) {
    println!();
    println!(
        "{}",
        format!(
            "Question {} of {} ({:.0}%)",
            test.step() + 1,
            test.questions().len(),
            test.progress()
        )
        .bright_black()
    );
    println!("{}", question.prompt.bold());
    for (index, option) in question.options.iter().enumerate() {
        let marker = if test.current_answer() == Some(index) { "*" } else { " " };
        println!("{} {}) {} {}", marker, index + 1, swatch(option.color), option.label);
    }
}

pub async fn run(ctx: &AppContext) -> Result<()> {
    ctx.require_account().await;

    println!("{}", "=== Cone Contrast Test ===".bright_magenta().bold());
    println!(
        "{}",
        "Answer with 1 or 2, '<' to go back, 'q' to quit.".bright_black()
    );

    let mut test = ConeTest::standard();
    let mut prompt = Prompt::stdin();

    loop {
        let Some(question) = test.current_question().cloned() else {
            break;
        };
        show_question(&test, &question);

        let Some(line) = prompt.next_line().await? else {
            println!("{}", "Input closed; test abandoned.".yellow());
            return Ok(());
        };
        match parse_input(&line) {
            Input::Choose(index) => {
                test.answer(index)?;
                if test.advance()? {
                    break;
                }
            }
            Input::Back => test.previous(),
            Input::Quit => {
                println!("{}", "Test abandoned.".yellow());
                return Ok(());
            }
            Input::Unknown => println!("{}", "Please answer 1 or 2.".yellow()),
        }
    }

    let profile = ctx.usecase.complete_cone_test(&test).await?;
    println!();
    println!("{}", "=== Your Cone Sensitivity ===".bright_magenta().bold());
    print_profile(&profile);

    if ctx.usecase.enable_adaptation().await {
        let simulator = ctx.usecase.simulator().await;
        for line in simulator.recommendations() {
            println!("  - {}", line);
        }
    }
    Ok(())
}
