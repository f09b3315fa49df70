mod widget;
pub(crate) use self::widget::Calendar;
