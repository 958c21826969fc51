pub mod import;
pub mod run;

use colored::Colorize;
use streamsync_core::Applied;

/// 結果を1行で表示
pub fn print_outcome(name: &str, outcome: &Applied) {
    match outcome {
        Applied::Created(stream) => {
            let repository = stream.docker_image_repository.as_deref().unwrap_or("-");
            println!(
                "{} ImageStream {} を作成しました ({})",
                "✓".green(),
                name.cyan(),
                repository
            );
        }
        Applied::Imported => {
            println!("{} {} のタグをインポートしました", "✓".green(), name.cyan());
        }
    }
}
