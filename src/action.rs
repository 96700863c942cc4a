/// User intents, decoupled from the keys that produce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ForceQuit,
    NavigateUp,
    NavigateDown,
    Select,
    Back,
    StartFilter,
    InputChar(char),
    InputBackspace,
    InputEscape,
    DeleteBranch,
    PrMergeDelete,
    Refresh,
    ConfirmYes,
    ConfirmNo,
    None,
}
