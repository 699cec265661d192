//! Bundled sample catalog: two beginner courses, two live classes and the
//! scripted opening of the first class's chat.

use chrono::{DateTime, Duration, TimeZone, Utc};
use edu_core::model::{
    ChatMessage, Course, CourseId, CourseLevel, CourseMeta, LiveClass, LiveClassId, MessageId,
    Module, ModuleContent, ModuleId, Question, QuestionId, VideoLocator,
};

const NUMBERS_READING: &str = r"# Introduction to Numbers

Numbers are the foundation of mathematics. In this module, we'll explore:

## What are Numbers?
Numbers are symbols used to represent quantities. They help us count, measure, and calculate.

## Types of Numbers:
1. **Natural Numbers**: 1, 2, 3, 4, 5...
2. **Whole Numbers**: 0, 1, 2, 3, 4...
3. **Integers**: ...-2, -1, 0, 1, 2...

## Why Numbers Matter
Numbers are everywhere in our daily lives:
- Counting livestock
- Measuring crops
- Managing money
- Telling time

Understanding numbers helps us make better decisions and solve problems in our community.

## Practice Examples
- If you have 5 goats and buy 3 more, how many goats do you have? (5 + 3 = 8)
- If you sell 2 goats from your 8 goats, how many remain? (8 - 2 = 6)

Numbers help us understand and organize our world better.";

const ALPHABET_READING: &str = r"# The English Alphabet

The English alphabet has 26 letters. Learning these letters is the first step to reading and writing in English.

## The 26 Letters:
**Uppercase**: A B C D E F G H I J K L M N O P Q R S T U V W X Y Z
**Lowercase**: a b c d e f g h i j k l m n o p q r s t u v w x y z

## Vowels and Consonants:
- **Vowels**: A, E, I, O, U (and sometimes Y)
- **Consonants**: All other letters

## Why Learn the Alphabet?
- To read books and signs
- To write letters and messages
- To use computers and phones
- To learn new words

## Practice Tips:
1. Say each letter out loud
2. Write each letter by hand
3. Find objects that start with each letter
4. Practice every day for 10 minutes

Remember: Learning takes time. Be patient with yourself and practice regularly.";

const SAMPLE_VIDEO_BASE: &str = "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample";

fn options(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn sample_video(file: &str) -> Result<VideoLocator, edu_core::Error> {
    Ok(VideoLocator::from_url(format!("{SAMPLE_VIDEO_BASE}/{file}"))?)
}

fn mathematics() -> Result<Course, edu_core::Error> {
    let quiz = vec![
        Question::new(
            QuestionId::new("q1"),
            "What is 5 + 3?",
            options(&["6", "7", "8", "9"]),
            2,
            "5 + 3 = 8. When we add 5 and 3, we get 8.",
        )?,
        Question::new(
            QuestionId::new("q2"),
            "Which of these is a whole number?",
            options(&["-1", "0", "1.5", "All of the above"]),
            1,
            "0 is a whole number. Whole numbers start from 0 and go up: 0, 1, 2, 3...",
        )?,
    ];

    let modules = vec![
        Module::new(
            ModuleId::new("1-1"),
            "Introduction to Numbers",
            None,
            ModuleContent::Reading {
                body: NUMBERS_READING.to_string(),
            },
            Some("15 min".into()),
        )?,
        Module::new(
            ModuleId::new("1-2"),
            "Basic Addition Video",
            Some("Learn basic addition through visual examples".into()),
            ModuleContent::Video {
                locator: sample_video("BigBuckBunny.mp4")?,
            },
            Some("10 min".into()),
        )?,
        Module::new(
            ModuleId::new("1-3"),
            "Numbers Quiz",
            Some("Test your understanding of basic numbers".into()),
            ModuleContent::Quiz { questions: quiz },
            None,
        )?,
    ];

    Ok(Course::new(
        CourseId::new("1"),
        "Mathematics Fundamentals",
        "Basic mathematics concepts for rural students",
        modules,
        CourseMeta {
            duration: "4 weeks".into(),
            level: CourseLevel::Beginner,
            thumbnail: Some("/api/placeholder/300/200".into()),
        },
    )?)
}

fn english() -> Result<Course, edu_core::Error> {
    let modules = vec![
        Module::new(
            ModuleId::new("2-1"),
            "The English Alphabet",
            None,
            ModuleContent::Reading {
                body: ALPHABET_READING.to_string(),
            },
            Some("20 min".into()),
        )?,
        Module::new(
            ModuleId::new("2-2"),
            "Pronunciation Guide",
            Some("Learn correct pronunciation of English letters".into()),
            ModuleContent::Video {
                locator: sample_video("ElephantsDream.mp4")?,
            },
            Some("15 min".into()),
        )?,
    ];

    Ok(Course::new(
        CourseId::new("2"),
        "English Language Basics",
        "Essential English skills for communication",
        modules,
        CourseMeta {
            duration: "6 weeks".into(),
            level: CourseLevel::Beginner,
            thumbnail: Some("/api/placeholder/300/200".into()),
        },
    )?)
}

/// The sample course catalog.
///
/// # Errors
///
/// Returns `edu_core::Error` if any sample entity fails validation.
pub fn sample_courses() -> Result<Vec<Course>, edu_core::Error> {
    Ok(vec![mathematics()?, english()?])
}

fn class_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The sample live-class schedule: one class in progress, one upcoming.
///
/// # Errors
///
/// Returns `edu_core::Error` if any sample entity fails validation.
pub fn sample_live_classes() -> Result<Vec<LiveClass>, edu_core::Error> {
    let day = class_day();
    Ok(vec![
        LiveClass::new(
            LiveClassId::new("live-1"),
            "Mathematics Problem Solving",
            "Teacher Sarah",
            day + Duration::hours(14),
            "45 min",
            "Mathematics",
            true,
            Some(sample_video("BigBuckBunny.mp4")?),
        )?,
        LiveClass::new(
            LiveClassId::new("live-2"),
            "English Conversation Practice",
            "Teacher John",
            day + Duration::hours(16),
            "30 min",
            "English",
            false,
            None,
        )?,
    ])
}

/// Opening lines of a class chat: first line five minutes after `starts_at`,
/// then one per minute.
#[must_use]
pub fn scripted_chat(teacher: &str, starts_at: DateTime<Utc>) -> Vec<ChatMessage> {
    let lines = [
        (teacher, "Welcome everyone! Today we will solve math problems together.", true),
        ("Student A", "Thank you teacher!", false),
        ("Student B", "I have a question about fractions", false),
        (teacher, "Great! We will cover fractions in detail today.", true),
    ];

    lines
        .into_iter()
        .zip(1_i64..)
        .map(|((author, body, is_teacher), n)| {
            ChatMessage::new(
                MessageId::new(n.to_string()),
                author,
                body,
                starts_at + Duration::minutes(4 + n),
                is_teacher,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use edu_core::model::ModuleKind;

    #[test]
    fn sample_courses_validate() {
        let courses = sample_courses().unwrap();
        assert_eq!(courses.len(), 2);

        let kinds: Vec<ModuleKind> = courses[0].modules().iter().map(Module::kind).collect();
        assert_eq!(kinds, [ModuleKind::Reading, ModuleKind::Video, ModuleKind::Quiz]);

        let quiz = courses[0].modules()[2].questions().unwrap();
        let key: Vec<usize> = quiz.iter().map(Question::correct_index).collect();
        assert_eq!(key, [2, 1]);
    }

    #[test]
    fn scripted_chat_starts_at_five_past() {
        let start = class_day() + Duration::hours(14);
        let chat = scripted_chat("Teacher Sarah", start);
        assert_eq!(chat.len(), 4);
        assert_eq!(chat[0].time_label(), "14:05");
        assert_eq!(chat[3].time_label(), "14:08");
        assert!(chat[0].is_teacher);
        assert!(!chat[1].is_teacher);
    }
}
