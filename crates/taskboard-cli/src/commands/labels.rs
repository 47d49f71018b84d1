use anyhow::Result;
use taskboard_core::models::Task;
use taskboard_core::repository::TaskRepository;

use crate::views::table::display_names;

pub async fn list_labels(repo: &impl TaskRepository) -> Result<()> {
    let board = repo.load_board().await?;
    let open: Vec<&Task> = board.tasks.iter().filter(|t| !t.is_done()).collect();

    let labels = count_usage(&board.labels, &open, |task| &task.labels);
    let stakeholders = count_usage(&board.stakeholders, &open, |task| &task.stakeholders);

    display_names("Labels", &labels);
    display_names("Stakeholders", &stakeholders);
    Ok(())
}

fn count_usage<F>(names: &[String], tasks: &[&Task], field: F) -> Vec<(String, usize)>
where
    F: Fn(&Task) -> &Vec<String>,
{
    names
        .iter()
        .map(|name| {
            let count = tasks.iter().filter(|task| field(**task).contains(name)).count();
            (name.clone(), count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_usage() {
        let tasks = [
            Task {
                labels: vec!["work".to_string()],
                ..Default::default()
            },
            Task {
                labels: vec!["work".to_string(), "home".to_string()],
                ..Default::default()
            },
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        let names = vec!["work".to_string(), "home".to_string(), "garden".to_string()];

        let counts = count_usage(&names, &refs, |task| &task.labels);
        assert_eq!(
            counts,
            vec![
                ("work".to_string(), 2),
                ("home".to_string(), 1),
                ("garden".to_string(), 0)
            ]
        );
    }
}
