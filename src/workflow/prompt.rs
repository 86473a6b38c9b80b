use super::{Diagnostic, Workflow, WorkflowStep};
use crate::graph::NodeKind;
use ahash::AHashMap;
use itertools::Itertools;

/// Renders a workflow as a plain-text execution prompt.
///
/// Steps are numbered in export order and transitions reference those
/// numbers, so the text is stable for an unchanged graph.
pub fn render_prompt(workflow: &Workflow) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Workflow with {} actor(s) and {} step(s).\n",
        workflow.actors.len(),
        workflow.steps.len()
    ));
    render_body(workflow, 0, &mut output);
    output
}

fn render_body(workflow: &Workflow, depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);

    if !workflow.actors.is_empty() {
        output.push_str(&format!("\n{}Actors:\n", indent));
        for actor in &workflow.actors {
            let role = if actor.role.is_empty() {
                String::new()
            } else {
                format!(", role: {}", actor.role)
            };
            output.push_str(&format!(
                "{}- {} ({}{}) [{}]\n",
                indent,
                actor.name,
                actor.kind.as_str(),
                role,
                actor.id
            ));
        }
    }

    let numbers: AHashMap<&str, usize> = workflow
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| (step.id.as_str(), i + 1))
        .collect();

    output.push_str(&format!("\n{}Steps:\n", indent));
    for (i, step) in workflow.steps.iter().enumerate() {
        output.push_str(&format!(
            "{}{}. [{}] {} ({})\n",
            indent,
            i + 1,
            step.kind,
            step.action,
            step.id
        ));
        render_transitions(step, &numbers, &indent, output);
        if let Some(sub) = &step.sub_workflow {
            output.push_str(&format!("{}   Internal flow:\n", indent));
            render_body(sub, depth + 2, output);
        }
    }

    let notes = workflow
        .diagnostics
        .iter()
        .filter_map(|d| match d {
            Diagnostic::AmbiguousBranch {
                node_id,
                handle,
                kept,
                ignored,
            } => Some(format!(
                "{}- Step {} has several \"{}\" branches; follow {} and ignore {}.",
                indent, node_id, handle, kept, ignored
            )),
            Diagnostic::DanglingEdge { .. } => None,
        })
        .join("\n");
    if !notes.is_empty() {
        output.push_str(&format!("\n{}Notes:\n{}\n", indent, notes));
    }
}

fn render_transitions(
    step: &WorkflowStep,
    numbers: &AHashMap<&str, usize>,
    indent: &str,
    output: &mut String,
) {
    let reference = |id: &str| match numbers.get(id) {
        Some(n) => format!("step {}", n),
        None => id.to_string(),
    };

    if let Some(role) = step.role.as_deref().filter(|r| !r.is_empty()) {
        output.push_str(&format!("{}   role: {}\n", indent, role));
    }

    match (&step.branches, step.kind) {
        (Some(branches), NodeKind::Decision) => {
            if step.next.is_empty() {
                output.push_str(&format!("{}   then: end\n", indent));
            }
            if let Some(yes) = &branches.yes {
                output.push_str(&format!("{}   if yes: go to {}\n", indent, reference(yes)));
            }
            if let Some(no) = &branches.no {
                output.push_str(&format!("{}   if no: go to {}\n", indent, reference(no)));
            }
            let others = step
                .next
                .iter()
                .filter(|id| Some(*id) != branches.yes.as_ref() && Some(*id) != branches.no.as_ref())
                .map(|id| reference(id))
                .unique()
                .join(", ");
            if !others.is_empty() {
                output.push_str(&format!("{}   otherwise also: {}\n", indent, others));
            }
        }
        _ => {
            if step.next.is_empty() {
                output.push_str(&format!("{}   then: end\n", indent));
            } else {
                let targets = step.next.iter().map(|id| reference(id)).unique().join(", ");
                output.push_str(&format!("{}   then: {}\n", indent, targets));
            }
        }
    }
}
