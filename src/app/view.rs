use super::messages::{Message, ViewKind};
use super::state::constants::LANGUAGES;
use super::state::{App, LoadStatus};
use crate::content::{AccordionNode, CardNode, HeaderContent, Line, SectionNode, Tone, ViewTree};
use iced::alignment::Vertical;
use iced::widget::{
    Column, Row, button, column, container, horizontal_space, pick_list, row, scrollable, text,
    text_input,
};
use iced::{Element, Font, Length, font};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let mut nav: Row<'_, Message> = Row::new().spacing(8);
        for view in ViewKind::ALL {
            let entry = if view == self.active_view {
                button(view.label())
            } else {
                button(view.label()).on_press(Message::ViewSelected(view))
            };
            nav = nav.push(entry);
        }

        let language_picker = pick_list(LANGUAGES, Some(self.language), Message::LanguageSelected);
        let header = row![nav, horizontal_space(), language_picker]
            .spacing(8)
            .align_y(Vertical::Center)
            .width(Length::Fill);

        let placeholder = format!("Search {}...", self.active_view.label());
        let search_box = text_input(&placeholder, &self.search.query)
            .on_input(Message::SearchQueryChanged)
            .width(Length::Fill);

        let body: Element<'_, Message> = match self.active_view {
            ViewKind::Scripts => self.document_body(ViewKind::Scripts, &self.content.scripts),
            ViewKind::Activities => {
                self.document_body(ViewKind::Activities, &self.content.activities)
            }
            ViewKind::Library => self.document_body(ViewKind::Library, &self.content.library),
            ViewKind::Notes => self.notes_body(),
        };

        let mut layout: Column<'_, Message> = column![header, search_box, body]
            .spacing(12)
            .padding(16)
            .height(Length::Fill);

        if let Some(toast) = &self.toast {
            layout = layout.push(
                container(text(&toast.message))
                    .style(container::rounded_box)
                    .padding([6.0, 12.0]),
            );
        }

        layout.into()
    }
}

impl App {
    fn document_body<'a>(
        &'a self,
        view: ViewKind,
        status: &'a LoadStatus,
    ) -> Element<'a, Message> {
        match status {
            LoadStatus::Loading => container(
                text(format!("Loading {}...", view.label().to_lowercase()))
                    .style(text::secondary),
            )
            .center_x(Length::Fill)
            .padding(24)
            .into(),
            LoadStatus::Failed { resource } => {
                container(text(format!("Error loading {resource}")).style(text::danger))
                    .center_x(Length::Fill)
                    .padding(24)
                    .into()
            }
            LoadStatus::Ready(tree) => tree_body(view, tree),
        }
    }

    fn notes_body(&self) -> Element<'_, Message> {
        let form = row![
            text_input("Add a note...", &self.notes.draft)
                .on_input(Message::NoteDraftChanged)
                .on_submit(Message::NoteSubmitted)
                .width(Length::Fill),
            button("Add").on_press(Message::NoteSubmitted),
        ]
        .spacing(8)
        .align_y(Vertical::Center);

        // The notes tree is a single always-open accordion; only its cards
        // are rendered, without header chrome.
        let mut list: Column<'_, Message> = Column::new().spacing(6);
        for accordion in &self.notes.tree.accordions {
            for section in &accordion.sections {
                for card in &section.cards {
                    if card.visible {
                        list = list.push(card_block(card));
                    }
                }
            }
        }

        column![form, scrollable(list).height(Length::Fill)]
            .spacing(12)
            .into()
    }
}

fn tree_body(view: ViewKind, tree: &ViewTree) -> Element<'_, Message> {
    let mut list: Column<'_, Message> = Column::new().spacing(10);
    for (index, accordion) in tree.accordions.iter().enumerate() {
        list = list.push(accordion_block(view, index, accordion));
    }
    scrollable(list).height(Length::Fill).into()
}

fn accordion_block<'a>(
    view: ViewKind,
    index: usize,
    accordion: &'a AccordionNode,
) -> Element<'a, Message> {
    let toggle = button(header_line(&accordion.header))
        .on_press(Message::AccordionToggled { view, index })
        .style(button::secondary)
        .width(Length::Fill);

    let mut block: Column<'a, Message> = column![toggle].spacing(8);
    if accordion.open {
        if let Some(intro) = &accordion.intro {
            block = block.push(text(intro).style(text::secondary));
        }
        for section in &accordion.sections {
            block = block.push(section_block(section));
        }
    }

    container(block)
        .style(container::rounded_box)
        .padding(8)
        .width(Length::Fill)
        .into()
}

fn header_line(header: &HeaderContent) -> Row<'_, Message> {
    let mut parts: Row<'_, Message> = Row::new().spacing(6).align_y(Vertical::Center);
    if let Some(icon) = &header.icon {
        parts = parts.push(text(icon));
    }
    parts = parts.push(text(&header.title));
    if let Some(annotation) = &header.annotation {
        parts = parts.push(
            text(format!("({annotation})"))
                .size(13)
                .style(text::secondary),
        );
    }
    parts
}

fn section_block(section: &SectionNode) -> Element<'_, Message> {
    let mut block: Column<'_, Message> = Column::new().spacing(6);
    if let Some(title) = &section.title {
        block = block.push(text(title).size(14).style(text::secondary));
    }
    for card in &section.cards {
        if card.visible {
            block = block.push(card_block(card));
        }
    }
    block.into()
}

fn card_block(card: &CardNode) -> Element<'_, Message> {
    let mut lines: Column<'_, Message> = Column::new().spacing(2);
    for line in card.body.display_lines() {
        lines = lines.push(line_text(line));
    }

    let mut actions: Row<'_, Message> = Row::new().spacing(4);
    if let Some(spec) = &card.actions.speak {
        actions = actions.push(
            button("🔊")
                .style(button::text)
                .on_press(Message::SpeakRequested(spec.clone())),
        );
    }
    if let Some(copy) = &card.actions.copy {
        actions = actions.push(
            button("📋")
                .style(button::text)
                .on_press(Message::CopyRequested(copy.clone())),
        );
    }
    if let Some(index) = card.actions.delete {
        actions = actions.push(
            button("🗑")
                .style(button::text)
                .on_press(Message::NoteDeleteRequested(index)),
        );
    }

    container(
        row![lines.width(Length::Fill), actions]
            .spacing(8)
            .align_y(Vertical::Center),
    )
    .style(container::rounded_box)
    .padding(8)
    .width(Length::Fill)
    .into()
}

fn line_text(line: Line) -> Element<'static, Message> {
    let rendered = text(line.text);
    match line.tone {
        Tone::Plain => rendered.into(),
        Tone::Strong => rendered
            .font(Font {
                weight: font::Weight::Bold,
                ..Font::DEFAULT
            })
            .into(),
        Tone::Dim => rendered.style(text::secondary).into(),
        Tone::Accent => rendered
            .font(Font {
                weight: font::Weight::Semibold,
                ..Font::DEFAULT
            })
            .into(),
    }
}
