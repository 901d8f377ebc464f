//! Judge questions.

use crate::prompt::{Priority, PromptBuilder};

/// Question for a brand-new comment.
#[must_use]
pub fn judge_generate_prompt(fence: &'static str, declaration: &str, comment: &str) -> PromptBuilder {
    PromptBuilder::new()
        .def("DECLARATION", declaration, fence, Priority::Low)
        .def("COMMENT", comment, fence, Priority::High)
        .text(
            "COMMENT was written to document DECLARATION. Decide whether it is \
             accurate, says something a reader of the signature could not \
             already see, and follows the language's documentation conventions.",
        )
}

/// Question for a rewritten comment.
#[must_use]
pub fn judge_update_prompt(
    fence: &'static str,
    declaration: &str,
    old_comment: &str,
    new_comment: &str,
) -> PromptBuilder {
    PromptBuilder::new()
        .def("DECLARATION", declaration, fence, Priority::Low)
        .def("OLD_COMMENT", old_comment, fence, Priority::High)
        .def("NEW_COMMENT", new_comment, fence, Priority::High)
        .text(
            "NEW_COMMENT is proposed to replace OLD_COMMENT on DECLARATION. \
             Decide whether the change fixes something that is wrong or missing, \
             or only rewords a comment that was already fine.",
        )
}
