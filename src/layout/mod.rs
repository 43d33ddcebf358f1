//! Layout compiler
//!
//! A pure function from the specification to an abstract node tree. The
//! tree decides grouping, tabbing, collapsing and button distribution;
//! the renderer later maps nodes onto concrete terminal widgets. Keeping
//! this step free of any toolkit type makes every layout decision
//! unit-testable.
//!
//! Order, top to bottom: image, top-level message, one container per
//! (tab, group) cluster in first-seen order, grids, comment, countdown
//! placeholder, button rows.

use crate::spec::{DialogSpec, Prompt};

/// One branch of the abstract widget tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Vertical sequence of children
    Stack(Vec<Node>),
    /// Message or comment paragraphs
    Text { lines: Vec<String>, muted: bool },
    /// The dialog banner image, when one decoded successfully
    Image,
    /// Bordered container; `title: None` keeps the border but hides the
    /// header, `collapsible` renders an expander instead of a plain box
    Group {
        title: Option<String>,
        collapsible: bool,
        body: Box<Node>,
    },
    /// Tab container with one page per tab key, in first-seen order
    Tabs(Vec<(String, Node)>),
    /// The interactive widget built for prompt `index`
    PromptRef(usize),
    /// Grid instance `index` (0-based here; answers use 1-based keys)
    GridRef(usize),
    /// Horizontal rule above a prompt that asked for one
    Separator,
    /// Placeholder for the timeout countdown label
    Countdown,
    /// One row of buttons, by index into the final button list
    ButtonRow(Vec<usize>),
}

/// Compile the specification into the abstract widget tree
///
/// `button_count` is the length of the final button list, after any
/// reserved buttons were inserted.
pub fn compile(spec: &DialogSpec, button_count: usize) -> Node {
    let mut children = Vec::new();

    if spec.image.is_some() {
        children.push(Node::Image);
    }
    if !spec.message.is_empty() {
        children.push(Node::Text {
            lines: spec.message.clone(),
            muted: false,
        });
    }

    children.extend(compile_clusters(spec));

    for grid_index in 0..spec.grid_data.len() {
        children.push(Node::GridRef(grid_index));
    }

    if !spec.comment.is_empty() {
        children.push(Node::Text {
            lines: spec.comment.clone(),
            muted: true,
        });
    }

    if spec.timeout_secs > 0 && spec.show_countdown {
        children.push(Node::Countdown);
    }

    children.extend(compile_button_rows(spec.button_rows, button_count));

    Node::Stack(children)
}

/// Cluster key: the (tab, group) pair
type ClusterKey = (Option<String>, Option<String>);

/// Group prompts by (tab, group) in first-occurrence order
///
/// An ordered list rather than a sorting map: cluster order must match
/// input order, not key order.
fn cluster_prompts(prompts: &[Prompt]) -> Vec<(ClusterKey, Vec<usize>)> {
    let mut clusters: Vec<(ClusterKey, Vec<usize>)> = Vec::new();
    for (index, prompt) in prompts.iter().enumerate() {
        let key = (prompt.tab.clone(), prompt.group.clone());
        match clusters.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, members)) => members.push(index),
            None => clusters.push((key, vec![index])),
        }
    }
    clusters
}

fn compile_clusters(spec: &DialogSpec) -> Vec<Node> {
    let clusters = cluster_prompts(&spec.prompts);
    let mut main_area = Vec::new();
    let mut tab_pages: Vec<(String, Vec<Node>)> = Vec::new();

    for ((tab, group), members) in clusters {
        let body = cluster_body(spec, &members);
        let node = match &group {
            Some(key) => Node::Group {
                title: group_title(key),
                collapsible: spec.collapsible_groups,
                body: Box::new(body),
            },
            None => body,
        };

        match tab {
            Some(tab_key) => {
                match tab_pages.iter_mut().find(|(name, _)| *name == tab_key) {
                    Some((_, nodes)) => nodes.push(node),
                    None => tab_pages.push((tab_key, vec![node])),
                }
            }
            None => main_area.push(node),
        }
    }

    if !tab_pages.is_empty() {
        main_area.push(Node::Tabs(
            tab_pages
                .into_iter()
                .map(|(name, nodes)| (name, Node::Stack(nodes)))
                .collect(),
        ));
    }

    main_area
}

/// The members of one cluster, in declaration order
fn cluster_body(spec: &DialogSpec, members: &[usize]) -> Node {
    let mut nodes = Vec::new();
    for &index in members {
        let prompt = &spec.prompts[index];
        if prompt.show_separator {
            nodes.push(Node::Separator);
        }
        nodes.push(compile_prompt(prompt, index));
    }
    Node::Stack(nodes)
}

/// A prompt that asked to collapse wraps itself in its own expander; this
/// wins over `Left` message placement, which cannot coexist with a header
fn compile_prompt(prompt: &Prompt, index: usize) -> Node {
    if prompt.collapsible {
        return Node::Group {
            title: prompt.message.clone(),
            collapsible: true,
            body: Box::new(Node::PromptRef(index)),
        };
    }
    Node::PromptRef(index)
}

/// A group key with no alphabetic character keeps its border but hides
/// the header
fn group_title(key: &str) -> Option<String> {
    if key.chars().any(char::is_alphabetic) {
        Some(key.to_string())
    } else {
        None
    }
}

/// Split buttons across rows: `ceil(total / rows)` per row, left to
/// right, last row may be short
fn compile_button_rows(rows: u16, button_count: usize) -> Vec<Node> {
    if button_count == 0 {
        return Vec::new();
    }
    let rows = usize::from(rows.max(1)).min(button_count);
    let per_row = button_count.div_ceil(rows);
    (0..button_count)
        .collect::<Vec<_>>()
        .chunks(per_row)
        .map(|chunk| Node::ButtonRow(chunk.to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Prompt;

    fn prompt_with(tab: Option<&str>, group: Option<&str>) -> Prompt {
        let mut prompt = Prompt::default();
        prompt.tab = tab.map(String::from);
        prompt.group = group.map(String::from);
        prompt
    }

    fn children(node: &Node) -> &[Node] {
        match node {
            Node::Stack(nodes) => nodes,
            other => panic!("expected stack, got {:?}", other),
        }
    }

    #[test]
    fn test_cluster_order_is_first_seen() {
        let prompts = vec![
            prompt_with(None, Some("zeta")),
            prompt_with(None, Some("alpha")),
            prompt_with(None, Some("zeta")),
        ];
        let clusters = cluster_prompts(&prompts);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].0 .1.as_deref(), Some("zeta"));
        assert_eq!(clusters[0].1, vec![0, 2]);
        assert_eq!(clusters[1].0 .1.as_deref(), Some("alpha"));
    }

    #[test]
    fn test_numeric_group_key_hides_header() {
        assert_eq!(group_title("1984"), None);
        assert_eq!(group_title("Network"), Some("Network".to_string()));
        assert_eq!(group_title("2nd stage"), Some("2nd stage".to_string()));
    }

    #[test]
    fn test_groupless_prompts_render_as_plain_stack() {
        let spec = DialogSpec::new("t")
            .prompt(Prompt::text("a"))
            .prompt(Prompt::text("b"))
            .button("OK");
        let tree = compile(&spec, 1);
        let top = children(&tree);

        assert_eq!(top[0], Node::Stack(vec![Node::PromptRef(0), Node::PromptRef(1)]));
        assert_eq!(top[1], Node::ButtonRow(vec![0]));
    }

    #[test]
    fn test_tabbed_clusters_land_in_tab_pages() {
        let spec = DialogSpec::new("t")
            .prompt(Prompt::text("plain"))
            .prompt(Prompt::text("a").tab("Two"))
            .prompt(Prompt::text("b").tab("One"))
            .prompt(Prompt::text("c").tab("Two").group("G"));
        let tree = compile(&spec, 0);
        let top = children(&tree);

        // Untabbed cluster first, then the tab container.
        assert!(matches!(top[0], Node::Stack(_)));
        let Node::Tabs(pages) = &top[1] else {
            panic!("expected tabs, got {:?}", top[1]);
        };
        assert_eq!(pages[0].0, "Two");
        assert_eq!(pages[1].0, "One");
        // The grouped cluster stays inside its tab.
        let two = children(&pages[0].1);
        assert!(matches!(two[1], Node::Group { .. }));
    }

    #[test]
    fn test_collapsible_prompt_beats_left_message_position() {
        let prompt = Prompt::text("a")
            .message("Details")
            .message_left()
            .collapsible(true);
        let node = compile_prompt(&prompt, 0);
        assert_eq!(
            node,
            Node::Group {
                title: Some("Details".to_string()),
                collapsible: true,
                body: Box::new(Node::PromptRef(0)),
            }
        );
    }

    #[test]
    fn test_separator_precedes_prompt() {
        let spec = DialogSpec::new("t")
            .prompt(Prompt::text("a"))
            .prompt(Prompt::text("b").separator(true));
        let tree = compile(&spec, 0);
        let cluster = children(&children(&tree)[0]);
        assert_eq!(
            cluster,
            &[Node::PromptRef(0), Node::Separator, Node::PromptRef(1)]
        );
    }

    #[test]
    fn test_button_rows_split_evenly() {
        let rows = compile_button_rows(2, 5);
        assert_eq!(
            rows,
            vec![
                Node::ButtonRow(vec![0, 1, 2]),
                Node::ButtonRow(vec![3, 4]),
            ]
        );

        // More rows than buttons degrades to one button per row.
        let rows = compile_button_rows(9, 2);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_countdown_only_when_requested() {
        let plain = DialogSpec::new("t");
        assert!(!children(&compile(&plain, 0)).contains(&Node::Countdown));

        let timed = DialogSpec::new("t").timeout(std::time::Duration::from_secs(5), true);
        assert!(children(&compile(&timed, 0)).contains(&Node::Countdown));
    }
}
