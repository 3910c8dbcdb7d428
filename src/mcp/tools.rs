//! Workshop tools exposed over MCP.
//!
//! Each handler fetches what it needs from the [`Workshop`], asks the
//! resolver in [`crate::progress`] for an answer, and writes any change back
//! through the workshop. Handlers return `Ok(text)` for the learner-facing
//! result and `Err(message)` for an `isError` tool result.

use chrono::Utc;
use serde_json::{json, Value};

use crate::mcp::server::{ToolCallResult, ToolDefinition};
use crate::notifications::{visible_notifications, NotificationSettings, VisibilityContext};
use crate::progress::{
    advance_playground, next_incomplete, resolve_coordinates, sorted_by_rank, CoordinateRequest,
    CourseOutline, ProgressRecord, ResolveError, StepCoordinates, StepKind, Unit,
};
use crate::workshop::{Workshop, WorkshopInfo};

type ToolResult = Result<String, String>;

/// Dispatches a tool call by name.
pub fn call_tool(
    workshop: &dyn Workshop,
    settings: &NotificationSettings,
    name: &str,
    arguments: &Value,
) -> ToolCallResult {
    let result = match name {
        "set_playground" => set_playground(workshop, arguments),
        "get_playground" => get_playground(workshop),
        "get_what_is_next" => get_what_is_next(workshop),
        "update_progress" => update_progress(workshop, arguments),
        "get_user_progress" => get_user_progress(workshop),
        "get_workshop_context" => Ok(workshop_summary(
            workshop.info(),
            &workshop.get_exercises(),
        )),
        "get_exercise_context" => get_exercise_context(workshop, arguments),
        "get_notifications" => get_notifications(workshop, settings),
        _ => Err(format!("Unknown tool: {name}")),
    };

    match result {
        Ok(text) => ToolCallResult::text(text),
        Err(message) => {
            tracing::debug!(tool = name, %message, "Tool call failed");
            ToolCallResult::error(message)
        }
    }
}

/// Returns the definitions of every workshop tool.
#[allow(clippy::too_many_lines)]
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "set_playground".to_string(),
            description: Some(
                "Set the playground to an exercise step so the user can work on it. \
                 This replaces whatever the user currently has in the playground. \
                 Prefer calling it with no arguments: if the user's progress is tracked it \
                 moves to the next incomplete step, otherwise to the problem after the \
                 current one. Only pass arguments when the user asks for a specific step. \
                 Missing arguments default to the current playground, so \
                 {\"type\": \"solution\"} shows the current step's solution and \
                 {\"stepNumber\": 2} moves to step 2 of the current exercise."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "exerciseNumber": {
                        "type": "integer",
                        "description": "The exercise number to set the playground to"
                    },
                    "stepNumber": {
                        "type": "integer",
                        "description": "The step number to set the playground to"
                    },
                    "type": {
                        "type": "string",
                        "enum": ["problem", "solution"],
                        "description": "Whether to set the playground to the problem or the solution"
                    }
                }
            }),
        },
        ToolDefinition {
            name: "get_playground".to_string(),
            description: Some(
                "Get the exercise step the playground is currently set to.".to_string(),
            ),
            input_schema: json!({ "type": "object", "properties": {} }),
        },
        ToolDefinition {
            name: "get_what_is_next".to_string(),
            description: Some(
                "Get the next thing the user needs to do to continue the workshop: watch an \
                 intro or outro, or work through an exercise step. Call it again after \
                 marking a lesson complete with update_progress."
                    .to_string(),
            ),
            input_schema: json!({ "type": "object", "properties": {} }),
        },
        ToolDefinition {
            name: "update_progress".to_string(),
            description: Some(
                "Mark a lesson as complete or incomplete. Lesson slugs come from \
                 get_what_is_next, get_user_progress or get_exercise_context."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "epicLessonSlug": {
                        "type": "string",
                        "description": "The slug of the lesson to update"
                    },
                    "complete": {
                        "type": "boolean",
                        "description": "Whether to mark the lesson complete (default: true)"
                    }
                },
                "required": ["epicLessonSlug"]
            }),
        },
        ToolDefinition {
            name: "get_user_progress".to_string(),
            description: Some(
                "Get the user's progress through the workshop in course order, including \
                 the next incomplete lesson. Share the URLs of incomplete lessons so the \
                 user can watch them."
                    .to_string(),
            ),
            input_schema: json!({ "type": "object", "properties": {} }),
        },
        ToolDefinition {
            name: "get_workshop_context".to_string(),
            description: Some(
                "Get an overview of the workshop: its title and every exercise and step. \
                 A good starting point before going into a single exercise."
                    .to_string(),
            ),
            input_schema: json!({ "type": "object", "properties": {} }),
        },
        ToolDefinition {
            name: "get_exercise_context".to_string(),
            description: Some(
                "Get one exercise's steps, their problem and solution apps, and the user's \
                 progress on it. Defaults to the exercise the playground is set to."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "exerciseNumber": {
                        "type": "integer",
                        "description": "The exercise to describe (default: the playground's exercise)"
                    }
                }
            }),
        },
        ToolDefinition {
            name: "get_notifications".to_string(),
            description: Some(
                "Get the workshop notifications the user should see (announcements, \
                 known issues)."
                    .to_string(),
            ),
            input_schema: json!({ "type": "object", "properties": {} }),
        },
    ]
}

// =============================================================================
// Argument parsing
// =============================================================================

/// Reads an optional step or exercise number.
///
/// Accepts integers, whole floats (`1.0`) and numeric strings. Zero counts as
/// not given.
fn optional_number(arguments: &Value, key: &str) -> Result<Option<u32>, String> {
    let parsed = match arguments.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64().and_then(whole_number),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().and_then(whole_number),
        Some(_) => None,
    };

    match parsed {
        Some(0) => Ok(None),
        Some(n) => Ok(Some(n)),
        None => Err(format!("{key} must be a positive integer")),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)] // whole and in range before the cast
fn whole_number(value: f64) -> Option<u32> {
    (value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value)).then(|| value as u32)
}

fn optional_kind(arguments: &Value, key: &str) -> Result<Option<StepKind>, String> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => StepKind::parse(s)
            .map(Some)
            .ok_or_else(|| format!("{key} must be 'problem' or 'solution', got '{s}'")),
        Some(_) => Err(format!("{key} must be 'problem' or 'solution'")),
    }
}

fn coordinate_request(arguments: &Value) -> Result<CoordinateRequest, String> {
    Ok(CoordinateRequest {
        exercise_number: optional_number(arguments, "exerciseNumber")?,
        step_number: optional_number(arguments, "stepNumber")?,
        kind: optional_kind(arguments, "type")?,
    })
}

fn pretty(value: &Value) -> ToolResult {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialise result: {e}"))
}

fn fetch_progress(workshop: &dyn Workshop) -> Result<Option<Vec<ProgressRecord>>, String> {
    workshop
        .get_progress()
        .map_err(|e| format!("Failed to load progress: {e}"))
}

// =============================================================================
// Playground
// =============================================================================

fn set_playground(workshop: &dyn Workshop, arguments: &Value) -> ToolResult {
    let request = coordinate_request(arguments)?;
    let outline = workshop.get_exercises();
    let current = workshop.get_playground_pointer();

    let target = if request.is_empty() {
        next_playground(workshop, &outline, current)?
    } else {
        resolve_coordinates(&outline, current, request).map_err(|e| e.to_string())?
    };

    workshop
        .set_playground_pointer(target)
        .map_err(|e| format!("Failed to set playground: {e}"))?;

    tracing::info!(app = %target, "Playground set");
    Ok(format!("Playground set to {target}."))
}

/// Where a no-argument `set_playground` goes.
///
/// Tracked progress wins; without it (or once everything is complete) the
/// playground advances to the next problem app.
fn next_playground(
    workshop: &dyn Workshop,
    outline: &CourseOutline,
    current: Option<StepCoordinates>,
) -> Result<StepCoordinates, String> {
    if let Some(records) = fetch_progress(workshop)? {
        match next_incomplete(&records) {
            Ok(Some(next)) => return progress_target(outline, next),
            Ok(None) => {}
            Err(ResolveError::UnknownUnitEncountered {
                lesson_slug,
                lesson_url,
            }) => {
                return Err(format!(
                    "The next lesson ({lesson_slug}) is not one this server knows how to set up. \
                     Ask the user to open {lesson_url} and continue from there."
                ));
            }
            Err(e) => return Err(e.to_string()),
        }
    }

    advance_playground(&outline.step_units(), current).map_err(|e| e.to_string())
}

fn progress_target(outline: &CourseOutline, next: &ProgressRecord) -> Result<StepCoordinates, String> {
    if let Unit::ExerciseStep(coords) = next.unit {
        let problem = StepCoordinates::problem(coords.exercise_number, coords.step_number);
        if outline.find_step(problem).is_none() {
            return Err(format!("No exercise app found for {problem}"));
        }
        return Ok(problem);
    }

    Err(format!(
        "The user needs to mark the {} as complete before they can continue. \
         Have them watch the video at {}, then mark it as complete using the \
         `update_progress` tool with the slug \"{}\".",
        lesson_label(next.unit),
        next.lesson_url,
        next.lesson_slug
    ))
}

fn lesson_label(unit: Unit) -> String {
    match unit {
        Unit::WorkshopIntro => "workshop instructions".to_string(),
        Unit::WorkshopOutro => "workshop finished lesson".to_string(),
        Unit::ExerciseIntro(n) => format!("exercise {n:02} instructions"),
        Unit::ExerciseOutro(n) => format!("exercise {n:02} finished lesson"),
        other => other.to_string(),
    }
}

fn get_playground(workshop: &dyn Workshop) -> ToolResult {
    let Some(pointer) = workshop.get_playground_pointer() else {
        return Ok(
            "The playground is not set. Use the `set_playground` tool to set it to an exercise step."
                .to_string(),
        );
    };

    let outline = workshop.get_exercises();
    let title = outline
        .find_step(pointer)
        .and_then(|step| step.app(pointer.kind))
        .map(|app| app.title.clone());

    pretty(&json!({
        "app": pointer.to_string(),
        "exerciseNumber": pointer.exercise_number,
        "stepNumber": pointer.step_number,
        "type": pointer.kind,
        "title": title,
    }))
}

// =============================================================================
// Progress
// =============================================================================

fn get_what_is_next(workshop: &dyn Workshop) -> ToolResult {
    let Some(records) = fetch_progress(workshop)? else {
        return Ok("The user is not logged in, so their progress is not tracked. \
                   Ask them to log in to the workshop app to track their progress. Until then, \
                   use `set_playground` with no arguments to move them to the next exercise step."
            .to_string());
    };

    let outline = workshop.get_exercises();
    let summary = || workshop_summary(workshop.info(), &outline);

    let next = match next_incomplete(&records) {
        Ok(Some(next)) => next,
        Ok(None) => {
            return Ok(format!(
                "The user has completed the workshop. Congratulate them and invite them to ask \
                 you to quiz them on their understanding of the material. A summary of the \
                 material is below:\n\n{}",
                summary()
            ));
        }
        Err(e) => {
            return Err(format!(
                "Cannot tell what comes next: {e}. Sorry, we don't know what to do here. \
                 Here's a summary of the workshop:\n\n{}",
                summary()
            ));
        }
    };

    let mark_complete = format!(
        "When they say they're done or ready for what's next, mark it as complete using the \
         `update_progress` tool with the slug \"{}\" and then call `get_what_is_next` again.",
        next.lesson_slug
    );

    match next.unit {
        Unit::WorkshopIntro => Ok(format!(
            "The user has just begun! They need to watch the workshop instructions video at {} \
             to get started. {mark_complete}\n\n{}",
            next.lesson_url,
            summary()
        )),
        Unit::WorkshopOutro => Ok(format!(
            "The user has almost completed the workshop. They just need to watch the workshop \
             finished video at {}. {mark_complete}",
            next.lesson_url
        )),
        Unit::ExerciseIntro(n) => Ok(format!(
            "The user needs to complete the intro for exercise {n:02}{}. Have them watch the \
             video at {}. {mark_complete}",
            exercise_title_suffix(&outline, n),
            next.lesson_url
        )),
        Unit::ExerciseOutro(n) => Ok(format!(
            "The user is almost finished with exercise {n:02}{}. They need to watch the outro \
             video at {}. {mark_complete}",
            exercise_title_suffix(&outline, n),
            next.lesson_url
        )),
        Unit::ExerciseStep(coords) => step_instructions(&outline, next, coords),
        Unit::Unknown | Unit::Unrecognized => Err(
            "This is unexpected, but the next step for the user is unknown. Sorry!".to_string(),
        ),
    }
}

fn exercise_title_suffix(outline: &CourseOutline, exercise_number: u32) -> String {
    outline
        .exercise(exercise_number)
        .map(|e| format!(" ({})", e.title))
        .unwrap_or_default()
}

fn step_instructions(
    outline: &CourseOutline,
    next: &ProgressRecord,
    coords: StepCoordinates,
) -> ToolResult {
    let (ex, st) = (coords.exercise_number, coords.step_number);
    let step = outline
        .exercise(ex)
        .and_then(|e| e.step(st))
        .ok_or_else(|| format!("No step found for exercise {ex} step {st}"))?;

    let describe = |kind: StepKind| {
        step.app(kind).map_or_else(
            || format!("No {kind} app for this step"),
            |app| match &app.full_path {
                Some(path) => format!("{} ({})", app.title, path.display()),
                None => app.title.clone(),
            },
        )
    };

    Ok(format!(
        "The user is on step {st:02} of exercise {ex:02}. To complete this step they need to:\n\
         1. Watch the problem video at {url}\n\
         2. Review the problem instructions\n\
         3. Set the playground to the problem app (you can help them using the `set_playground` tool)\n\
         4. Work through the exercise in their playground\n\
         5. Watch the solution video at {url}/solution\n\
         6. Review the solution instructions\n\
         7. Mark the step as complete (you can help them using the `update_progress` tool with the slug \"{slug}\")\n\
         \n\
         Then you can call `get_what_is_next` again to get the next step.\n\
         \n\
         Problem: {problem}\n\
         Solution: {solution}",
        url = next.lesson_url,
        slug = next.lesson_slug,
        problem = describe(StepKind::Problem),
        solution = describe(StepKind::Solution),
    ))
}

fn update_progress(workshop: &dyn Workshop, arguments: &Value) -> ToolResult {
    let Some(slug) = arguments.get("epicLessonSlug").and_then(Value::as_str) else {
        return Err("Missing required parameter: epicLessonSlug".to_string());
    };
    let complete = match arguments.get("complete") {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err("complete must be a boolean".to_string()),
    };

    workshop
        .update_progress(slug, complete)
        .map_err(|e| format!("Failed to update progress: {e}"))?;

    Ok(format!(
        "Lesson with slug {slug} marked as {}",
        if complete { "complete" } else { "incomplete" }
    ))
}

fn get_user_progress(workshop: &dyn Workshop) -> ToolResult {
    let Some(records) = fetch_progress(workshop)? else {
        return Ok(
            "The user is not logged in, so their progress is not tracked.".to_string(),
        );
    };

    let next = match next_incomplete(&records) {
        Ok(next) => json!(next),
        Err(e) => json!({ "error": e.to_string() }),
    };
    let completed = records.iter().filter(|r| r.is_complete()).count();

    pretty(&json!({
        "completed": completed,
        "total": records.len(),
        "next": next,
        "progress": sorted_by_rank(&records),
    }))
}

// =============================================================================
// Context
// =============================================================================

/// Renders the workshop title, subtitle and exercise list as Markdown.
#[must_use]
pub fn workshop_summary(info: &WorkshopInfo, outline: &CourseOutline) -> String {
    let mut summary = format!("# {}\n\n{}\n\n## Exercises\n", info.title, info.subtitle);
    for exercise in &outline.exercises {
        summary.push_str(&format!(
            "\n{:02}. {}",
            exercise.exercise_number, exercise.title
        ));
        for step in &exercise.steps {
            summary.push_str(&format!("\n  {:02}. {}", step.step_number, step.title()));
        }
    }
    summary
}

fn get_exercise_context(workshop: &dyn Workshop, arguments: &Value) -> ToolResult {
    let pointer = workshop.get_playground_pointer();
    let exercise_number = optional_number(arguments, "exerciseNumber")?
        .or(pointer.map(|p| p.exercise_number))
        .ok_or_else(|| {
            "No exerciseNumber given and the playground is not set. \
             Provide an exerciseNumber or use `set_playground` first."
                .to_string()
        })?;

    let exercise = workshop
        .get_exercise(exercise_number)
        .ok_or_else(|| format!("No exercise found with number {exercise_number}"))?;

    let records = fetch_progress(workshop)?;
    let progress: Option<Vec<&ProgressRecord>> = records.as_deref().map(|records| {
        sorted_by_rank(records)
            .into_iter()
            .filter(|r| r.unit.exercise_number() == Some(exercise_number))
            .collect()
    });

    pretty(&json!({
        "exercise": exercise,
        "playground": pointer
            .filter(|p| p.exercise_number == exercise_number)
            .map(|p| p.to_string()),
        "progress": progress,
    }))
}

fn get_notifications(workshop: &dyn Workshop, settings: &NotificationSettings) -> ToolResult {
    let visible = visible_notifications(
        &workshop.remote_notifications(),
        &workshop.local_notifications(),
        VisibilityContext {
            product: &workshop.info().product,
            muted: &settings.muted,
            deployed: settings.deployed,
            now: Utc::now(),
        },
    );

    if visible.is_empty() {
        return Ok("There are no notifications.".to_string());
    }
    pretty(&json!(visible))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workshop::{InMemoryWorkshop, OutlineProvider, PlaygroundStore, ProgressReporter};

    fn record(id: &str, lesson_type: &str, ex: Option<u32>, st: Option<u32>, slug: &str) -> Value {
        json!({
            "id": id,
            "type": lesson_type,
            "exerciseNumber": ex,
            "stepNumber": st,
            "epicLessonSlug": slug,
            "epicLessonUrl": format!("https://example.com/{slug}"),
            "epicCompletedAt": null,
        })
    }

    /// Two exercises, with progress listed out of course order when tracked.
    fn sample_workshop(tracked: bool) -> InMemoryWorkshop {
        let progress = tracked.then(|| {
            json!([
                record("7", "workshop-finished", None, None, "workshop-outro"),
                record("4", "step", Some(1), Some(2), "ex-1-step-2"),
                record("2", "instructions", Some(1), None, "ex-1-intro"),
                record("6", "step", Some(2), Some(1), "ex-2-step-1"),
                record("1", "workshop-instructions", None, None, "workshop-intro"),
                record("5", "finished", Some(1), None, "ex-1-outro"),
                record("3", "step", Some(1), Some(1), "ex-1-step-1"),
            ])
        });
        let manifest = json!({
            "title": "Sample Workshop",
            "subtitle": "Learning by doing",
            "product": { "host": "www.epicweb.dev", "slug": "sample" },
            "exercises": [
                { "exerciseNumber": 1, "title": "Basics", "steps": [
                    { "stepNumber": 1, "problem": { "title": "Hello" }, "solution": { "title": "Hello" } },
                    { "stepNumber": 2, "problem": { "title": "Variables" }, "solution": { "title": "Variables" } }
                ] },
                { "exerciseNumber": 2, "title": "Advanced", "steps": [
                    { "stepNumber": 1, "problem": { "title": "Traits" }, "solution": { "title": "Traits" } }
                ] }
            ],
            "progress": progress,
            "notifications": {
                "remote": [
                    { "id": "welcome", "title": "Hi", "message": "Glad you're here", "type": "info" }
                ],
                "local": [
                    { "id": "office-hours", "title": "Office hours", "message": "Fridays", "type": "info" }
                ]
            }
        });
        InMemoryWorkshop::from_manifest(serde_json::from_value(manifest).unwrap())
    }

    fn call(workshop: &dyn Workshop, name: &str, arguments: Value) -> ToolCallResult {
        call_tool(workshop, &NotificationSettings::default(), name, &arguments)
    }

    fn text(result: &ToolCallResult) -> &str {
        match &result.content[0] {
            crate::mcp::server::ToolContent::Text { text } => text.as_str(),
        }
    }

    #[test]
    fn every_definition_is_dispatchable() {
        let workshop = sample_workshop(true);
        for tool in tool_definitions() {
            let result = call(&workshop, &tool.name, json!({}));
            assert!(
                !text(&result).starts_with("Unknown tool"),
                "{} is not dispatched",
                tool.name
            );
        }
    }

    #[test]
    fn unknown_tool_is_an_error() {
        let workshop = sample_workshop(true);
        let result = call(&workshop, "launch_rocket", json!({}));
        assert!(result.is_error);
    }

    #[test]
    fn set_playground_follows_progress() {
        let workshop = sample_workshop(true);
        workshop.update_progress("workshop-intro", true).unwrap();
        workshop.update_progress("ex-1-intro", true).unwrap();

        let result = call(&workshop, "set_playground", json!({}));
        assert!(!result.is_error, "{}", text(&result));
        assert_eq!(text(&result), "Playground set to 01.01.problem.");
        assert_eq!(
            workshop.get_playground_pointer(),
            Some(StepCoordinates::problem(1, 1))
        );
    }

    #[test]
    fn set_playground_blocks_on_unwatched_intro() {
        let workshop = sample_workshop(true);
        let result = call(&workshop, "set_playground", json!({}));
        assert!(result.is_error);
        assert!(text(&result).contains("workshop instructions"));
        assert!(text(&result).contains("https://example.com/workshop-intro"));
    }

    #[test]
    fn set_playground_without_progress_advances() {
        let workshop = sample_workshop(false);
        let first = call(&workshop, "set_playground", json!({}));
        assert_eq!(text(&first), "Playground set to 01.01.problem.");

        let second = call(&workshop, "set_playground", json!({}));
        assert_eq!(text(&second), "Playground set to 01.02.problem.");
    }

    #[test]
    fn set_playground_with_partial_arguments_defaults_from_current() {
        let workshop = sample_workshop(false);
        workshop
            .set_playground_pointer(StepCoordinates::problem(1, 2))
            .unwrap();

        let result = call(&workshop, "set_playground", json!({ "type": "solution" }));
        assert_eq!(text(&result), "Playground set to 01.02.solution.");

        let result = call(&workshop, "set_playground", json!({ "exerciseNumber": "2", "stepNumber": 1 }));
        assert_eq!(text(&result), "Playground set to 02.01.solution.");
    }

    #[test]
    fn set_playground_rejects_missing_app() {
        let workshop = sample_workshop(false);
        let result = call(
            &workshop,
            "set_playground",
            json!({ "exerciseNumber": 9, "stepNumber": 1, "type": "problem" }),
        );
        assert!(result.is_error);
        assert!(text(&result).contains("09.01.problem"));
    }

    #[test]
    fn set_playground_partial_without_current_is_ambiguous() {
        let workshop = sample_workshop(false);
        let result = call(&workshop, "set_playground", json!({ "stepNumber": 2 }));
        assert!(result.is_error);
        assert!(text(&result).contains("cannot determine"));
    }

    #[test]
    fn numbers_accept_floats_and_strings() {
        let args = json!({ "a": 1.0, "b": "2", "c": 3, "d": 0, "e": "0", "f": 1.5, "g": -1, "h": true });
        assert_eq!(optional_number(&args, "a"), Ok(Some(1)));
        assert_eq!(optional_number(&args, "b"), Ok(Some(2)));
        assert_eq!(optional_number(&args, "c"), Ok(Some(3)));
        assert_eq!(optional_number(&args, "d"), Ok(None));
        assert_eq!(optional_number(&args, "e"), Ok(None));
        assert_eq!(optional_number(&args, "missing"), Ok(None));
        assert!(optional_number(&args, "f").is_err());
        assert!(optional_number(&args, "g").is_err());
        assert!(optional_number(&args, "h").is_err());
    }

    #[test]
    fn set_playground_accepts_float_coordinates() {
        let workshop = sample_workshop(false);
        let result = call(
            &workshop,
            "set_playground",
            json!({ "exerciseNumber": 2.0, "stepNumber": 1.0, "type": "problem" }),
        );
        assert_eq!(text(&result), "Playground set to 02.01.problem.");
    }

    #[test]
    fn zero_exercise_number_means_not_given() {
        let workshop = sample_workshop(false);
        workshop
            .set_playground_pointer(StepCoordinates::problem(1, 1))
            .unwrap();
        let result = call(
            &workshop,
            "set_playground",
            json!({ "exerciseNumber": 0, "stepNumber": 2 }),
        );
        assert_eq!(text(&result), "Playground set to 01.02.problem.");
    }

    #[test]
    fn set_playground_rejects_bad_type() {
        let workshop = sample_workshop(false);
        let result = call(&workshop, "set_playground", json!({ "type": "playground" }));
        assert!(result.is_error);
    }

    #[test]
    fn what_is_next_walks_the_course() {
        let workshop = sample_workshop(true);

        let first = call(&workshop, "get_what_is_next", json!({}));
        assert!(text(&first).contains("just begun"));
        assert!(text(&first).contains("\"workshop-intro\""));

        call(&workshop, "update_progress", json!({ "epicLessonSlug": "workshop-intro" }));
        let second = call(&workshop, "get_what_is_next", json!({}));
        assert!(text(&second).contains("intro for exercise 01 (Basics)"));

        call(&workshop, "update_progress", json!({ "epicLessonSlug": "ex-1-intro" }));
        let third = call(&workshop, "get_what_is_next", json!({}));
        assert!(text(&third).contains("step 01 of exercise 01"));
        assert!(text(&third).contains("\"ex-1-step-1\""));
    }

    #[test]
    fn what_is_next_when_done_congratulates() {
        let workshop = sample_workshop(true);
        for slug in [
            "workshop-intro",
            "ex-1-intro",
            "ex-1-step-1",
            "ex-1-step-2",
            "ex-1-outro",
            "ex-2-step-1",
            "workshop-outro",
        ] {
            workshop.update_progress(slug, true).unwrap();
        }

        let result = call(&workshop, "get_what_is_next", json!({}));
        assert!(!result.is_error);
        assert!(text(&result).contains("completed the workshop"));
        assert!(text(&result).contains("01. Basics"));
    }

    #[test]
    fn what_is_next_without_login() {
        let workshop = sample_workshop(false);
        let result = call(&workshop, "get_what_is_next", json!({}));
        assert!(text(&result).contains("not logged in"));
    }

    #[test]
    fn update_progress_reports_unknown_slug() {
        let workshop = sample_workshop(true);
        let result = call(&workshop, "update_progress", json!({ "epicLessonSlug": "nope" }));
        assert!(result.is_error);

        let result = call(
            &workshop,
            "update_progress",
            json!({ "epicLessonSlug": "ex-1-intro", "complete": false }),
        );
        assert_eq!(text(&result), "Lesson with slug ex-1-intro marked as incomplete");
    }

    #[test]
    fn user_progress_is_in_course_order() {
        let workshop = sample_workshop(true);
        let result = call(&workshop, "get_user_progress", json!({}));
        let value: Value = serde_json::from_str(text(&result)).unwrap();

        let slugs: Vec<&str> = value["progress"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["epicLessonSlug"].as_str().unwrap())
            .collect();
        assert_eq!(
            slugs,
            vec![
                "workshop-intro",
                "ex-1-intro",
                "ex-1-step-1",
                "ex-1-step-2",
                "ex-1-outro",
                "ex-2-step-1",
                "workshop-outro",
            ]
        );
        assert_eq!(value["next"]["epicLessonSlug"], "workshop-intro");
        assert_eq!(value["completed"], 0);
    }

    #[test]
    fn user_progress_keeps_unrecognised_feed_type() {
        let manifest = json!({
            "title": "Quiz Workshop",
            "product": { "host": "www.epicweb.dev" },
            "progress": [
                record("1", "workshop-instructions", None, None, "intro"),
                record("2", "quiz", Some(1), None, "pop-quiz"),
            ]
        });
        let workshop = InMemoryWorkshop::from_manifest(serde_json::from_value(manifest).unwrap());

        let result = call(&workshop, "get_user_progress", json!({}));
        let value: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(value["progress"][0]["type"], "quiz");
        assert_eq!(value["progress"][0]["exerciseNumber"], 1);
        assert!(value["next"]["error"].as_str().unwrap().contains("pop-quiz"));
    }

    #[test]
    fn workshop_summary_format() {
        let workshop = sample_workshop(false);
        let summary = workshop_summary(workshop.info(), &workshop.get_exercises());
        assert!(summary.starts_with("# Sample Workshop\n\nLearning by doing\n\n## Exercises\n"));
        assert!(summary.contains("\n01. Basics\n  01. Hello\n  02. Variables"));
        assert!(summary.contains("\n02. Advanced\n  01. Traits"));
    }

    #[test]
    fn exercise_context_defaults_to_playground() {
        let workshop = sample_workshop(true);
        let missing = call(&workshop, "get_exercise_context", json!({}));
        assert!(missing.is_error);

        workshop
            .set_playground_pointer(StepCoordinates::solution(2, 1))
            .unwrap();
        let result = call(&workshop, "get_exercise_context", json!({}));
        let value: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(value["exercise"]["title"], "Advanced");
        assert_eq!(value["playground"], "02.01.solution");
        assert_eq!(value["progress"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn notifications_respect_muting() {
        let workshop = sample_workshop(false);
        let settings = NotificationSettings {
            deployed: false,
            muted: vec!["welcome".to_string()],
        };
        let result = call_tool(&workshop, &settings, "get_notifications", &json!({}));
        assert!(!text(&result).contains("welcome"));
        assert!(text(&result).contains("office-hours"));
    }
}
