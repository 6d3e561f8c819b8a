#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    /// Move the menu selection to the previous view.
    SelectPrev,
    /// Move the menu selection to the next view.
    SelectNext,
    /// Enter detail mode on the selected view.
    Confirm,
    /// Leave detail mode back to the menu.
    Dismiss,
    Refresh,
    CycleSortMode,
    CycleTheme,
    EnterFilterMode,
    ExitFilterMode,
    ClearFilter,
    UpdateFilter(String),
    ToggleHelp,
    None,
}
