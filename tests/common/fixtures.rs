use chrono::{TimeZone, Utc};
use kanri_lib::domain::entities::{Board, Story, StoryStatus};
use kanri_lib::domain::value_objects::ResourceId;

pub fn id(value: &str) -> ResourceId {
    ResourceId::new(value.to_string()).unwrap()
}

pub fn board(board_id: &str, title: &str) -> Board {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Board {
        id: id(board_id),
        title: title.to_string(),
        description: None,
        position: 0,
        created_at: at,
        updated_at: at,
    }
}

pub fn story(story_id: &str, title: &str, sprint_id: Option<&str>) -> Story {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Story {
        id: id(story_id),
        title: title.to_string(),
        description: None,
        sprint_id: sprint_id.map(str::to_string),
        epic_id: None,
        assignee_id: None,
        points: None,
        status: StoryStatus::Todo,
        position: 0,
        created_at: at,
        updated_at: at,
    }
}
